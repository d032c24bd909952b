//! Output sinks: virtual keyboard, battery state files, power-off

use crate::error::Result;
use crate::types::Button;

mod power;
mod status_files;
mod uinput;

pub use power::SystemPower;
pub use status_files::StatusFiles;
pub use uinput::UinputKeyboard;

/// Key-emission sink: a synchronized virtual keyboard device.
///
/// `emit` queues one key transition; `flush` commits the queued batch to the
/// device in emission order.
pub trait KeySink {
    /// Queue one press/release transition
    fn emit(&mut self, button: Button, pressed: bool) -> Result<()>;

    /// Commit the queued batch and synchronize the device
    fn flush(&mut self) -> Result<()>;
}

/// Battery state sink. Write failures are fatal to the daemon.
pub trait StatusSink {
    /// Record the charging/discharging classification
    fn write_status(&mut self, charging: bool) -> Result<()>;

    /// Record the whole-percent charge level
    fn write_capacity(&mut self, percent: i32) -> Result<()>;
}

/// Low-battery power-off action, invoked at most once per process
pub trait PowerAction {
    /// Power the system off
    fn power_off(&mut self) -> Result<()>;
}
