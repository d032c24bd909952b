//! MCP23017 button-pad expander driver
//!
//! All sixteen port lines are inputs with pull-ups and interrupt-on-change
//! enabled; buttons pull their line low when pressed. Polarity is normalized
//! here, at the read boundary: everything downstream sees active-high masks.

use crate::drivers::ButtonPad;
use crate::error::Result;
use crate::transport::Transport;
use crate::types::Button;

// Register map (bank 0)
const REG_IODIR_A: u8 = 0x00;
const REG_IOCON_A: u8 = 0x0A;
const REG_INTCAP_A: u8 = 0x10;

/// Number of sequential config registers rewritten during setup
/// (IODIRA through GPPUB)
const CONFIG_REGISTERS: usize = 14;

/// MCP23017 port expander over a register transport
pub struct Mcp23017<T: Transport> {
    transport: T,
}

impl<T: Transport> Mcp23017<T> {
    /// Program the expander for button input and clear any stale interrupt
    pub fn new(transport: T) -> Result<Self> {
        let mut pad = Mcp23017 { transport };
        pad.configure()?;
        // reading the mask clears an interrupt left pending from before setup
        pad.read_raw()?;
        log::info!("MCP23017 button pad configured");
        Ok(pad)
    }

    fn configure(&mut self) -> Result<()> {
        // If the chip powered up in bank 1, address 0x05 is IOCON; clearing
        // it selects bank 0. In bank 0 this writes IPOLB's reset value, a
        // harmless no-op.
        self.transport.write(&[0x05, 0x00])?;

        // IOCON: mirrored interrupt pins, sequential addressing, open-drain INT
        self.transport.write(&[REG_IOCON_A, 0x44])?;

        // Read the whole config block, then rewrite it with our settings
        let mut block = [0u8; CONFIG_REGISTERS + 1];
        block[0] = REG_IODIR_A;
        self.transport.write(&block[..1])?;
        self.transport.read(&mut block[1..])?;

        block[1] = 0xFF; // IODIRA: all inputs
        block[2] = 0xFF; // IODIRB
        block[3] = 0x00; // IPOLA: no input inversion
        block[4] = 0x00; // IPOLB
        block[5] = 0xFF; // GPINTENA: interrupt on change
        block[6] = 0xFF; // GPINTENB
        block[13] = 0xFF; // GPPUA: pull-ups on
        block[14] = 0xFF; // GPPUB
        self.transport.write(&block)
    }

    /// Raw port state, active-low.
    ///
    /// Reads INTCAPA..GPIOB in one burst: the capture registers clear the
    /// pending interrupt, the GPIO registers that follow hold the live state.
    fn read_raw(&mut self) -> Result<u16> {
        self.transport.write(&[REG_INTCAP_A])?;
        let mut buf = [0u8; 4];
        self.transport.read(&mut buf)?;
        Ok(u16::from(buf[2]) | (u16::from(buf[3]) << 8))
    }
}

impl<T: Transport> ButtonPad for Mcp23017<T> {
    fn read_mask(&mut self) -> Result<u16> {
        // lines read low when pressed; invert once here so callers only ever
        // reason in active-high terms
        Ok(!self.read_raw()? & Button::ALL_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;

    /// All lines high = nothing pressed
    const IDLE_PORTS: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

    fn pad_with(transport: &MockTransport) -> Mcp23017<MockTransport> {
        transport.queue_read(&[0u8; CONFIG_REGISTERS]); // config block read-back
        transport.queue_read(&IDLE_PORTS); // interrupt-clearing read
        Mcp23017::new(transport.clone()).unwrap()
    }

    #[test]
    fn setup_programs_inputs_interrupts_and_pullups() {
        let transport = MockTransport::new();
        pad_with(&transport);

        let writes = transport.raw_writes();
        assert_eq!(writes[0], vec![0x05, 0x00]);
        assert_eq!(writes[1], vec![REG_IOCON_A, 0x44]);
        assert_eq!(writes[2], vec![REG_IODIR_A]);

        let block = &writes[3];
        assert_eq!(block.len(), CONFIG_REGISTERS + 1);
        assert_eq!(block[0], REG_IODIR_A);
        assert_eq!(&block[1..3], &[0xFF, 0xFF]); // inputs
        assert_eq!(&block[3..5], &[0x00, 0x00]); // no polarity inversion
        assert_eq!(&block[5..7], &[0xFF, 0xFF]); // interrupt on change
        assert_eq!(&block[13..15], &[0xFF, 0xFF]); // pull-ups

        // setup ends with the interrupt-clearing capture read
        assert_eq!(writes[4], vec![REG_INTCAP_A]);
    }

    #[test]
    fn idle_pad_reads_empty_mask() {
        let transport = MockTransport::new();
        let mut pad = pad_with(&transport);

        transport.queue_read(&IDLE_PORTS);
        assert_eq!(pad.read_mask().unwrap(), 0x0000);
    }

    #[test]
    fn pressed_line_is_normalized_to_active_high() {
        let transport = MockTransport::new();
        let mut pad = pad_with(&transport);

        // port A bit 0 pulled low = first face button down
        transport.queue_read(&[0xFF, 0xFF, 0xFE, 0xFF]);
        assert_eq!(pad.read_mask().unwrap(), Button::Select.bit());

        // port B bit 7 pulled low = stick up
        transport.queue_read(&[0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(pad.read_mask().unwrap(), Button::StickUp.bit());
    }

    #[test]
    fn unconnected_bits_never_leak_into_the_mask() {
        let transport = MockTransport::new();
        let mut pad = pad_with(&transport);

        // bits 6 and 7 of port A low, but they map to no button
        transport.queue_read(&[0xFF, 0xFF, 0x3F, 0xFF]);
        assert_eq!(pad.read_mask().unwrap(), 0x0000);
    }

    #[test]
    fn read_failure_propagates() {
        let transport = MockTransport::new();
        let mut pad = pad_with(&transport);

        transport.fail_next();
        assert!(pad.read_mask().is_err());
    }
}
