//! Virtual keyboard sink via uinput

use super::KeySink;
use crate::error::Result;
use crate::types::Button;
use evdev::uinput::{VirtualDevice, VirtualDeviceBuilder};
use evdev::{AttributeSet, EventType, InputEvent, Key};

/// Key assigned to each logical button.
///
/// The stick doubles as arrow keys; the D-pad lands on number keys that the
/// console's frontend binds to shoulder actions.
fn key_for(button: Button) -> Key {
    match button {
        Button::Select => Key::KEY_LEFTCTRL,
        Button::Start => Key::KEY_S,
        Button::A => Key::KEY_ENTER,
        Button::Y => Key::KEY_Y,
        Button::B => Key::KEY_ESC,
        Button::X => Key::KEY_X,
        Button::PadDown => Key::KEY_9,
        Button::PadUp => Key::KEY_2,
        Button::PadRight => Key::KEY_1,
        Button::PadLeft => Key::KEY_8,
        Button::StickRight => Key::KEY_RIGHT,
        Button::StickLeft => Key::KEY_LEFT,
        Button::StickDown => Key::KEY_DOWN,
        Button::StickUp => Key::KEY_UP,
    }
}

/// Keyboard device backed by `/dev/uinput`
pub struct UinputKeyboard {
    device: VirtualDevice,
    pending: Vec<InputEvent>,
}

impl UinputKeyboard {
    /// Create the virtual keyboard with every button's key registered
    pub fn new(name: &str) -> Result<Self> {
        let mut keys = AttributeSet::<Key>::new();
        for button in Button::ALL {
            keys.insert(key_for(button));
        }

        let device = VirtualDeviceBuilder::new()?
            .name(name)
            .with_keys(&keys)?
            .build()?;
        log::info!("Created virtual keyboard \"{}\"", name);

        Ok(UinputKeyboard {
            device,
            pending: Vec::new(),
        })
    }
}

impl KeySink for UinputKeyboard {
    fn emit(&mut self, button: Button, pressed: bool) -> Result<()> {
        self.pending.push(InputEvent::new(
            EventType::KEY,
            key_for(button).code(),
            i32::from(pressed),
        ));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        // emit() appends the SYN_REPORT that commits the batch
        self.device.emit(&self.pending)?;
        self.pending.clear();
        Ok(())
    }
}
