//! Register-level transport for chip access

use crate::error::Result;

mod i2c;
mod mock;

pub use i2c::I2cTransport;
pub use mock::MockTransport;

/// Transport trait for register-level device communication.
///
/// Word access follows the chips' big-endian register convention;
/// implementations convert to the bus byte order where needed.
pub trait Transport: Send {
    /// Read a 16-bit register
    fn read_word(&mut self, register: u8) -> Result<u16>;

    /// Write a 16-bit register
    fn write_word(&mut self, register: u8, value: u16) -> Result<()>;

    /// Raw write (register pointer and/or data bytes)
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Raw read into the full buffer
    fn read(&mut self, buffer: &mut [u8]) -> Result<()>;
}
