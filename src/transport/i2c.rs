//! Linux I2C transport implementation

use super::Transport;
use crate::error::Result;
use i2cdev::core::I2CDevice;
use i2cdev::linux::LinuxI2CDevice;

/// I2C transport over a Linux `/dev/i2c-*` character device
pub struct I2cTransport {
    device: LinuxI2CDevice,
}

impl I2cTransport {
    /// Open an I2C device node and select a slave address
    ///
    /// # Arguments
    /// * `path` - Bus device path (e.g., "/dev/i2c-1")
    /// * `address` - 7-bit slave address
    pub fn open(path: &str, address: u16) -> Result<Self> {
        let device = LinuxI2CDevice::new(path, address)?;
        log::info!("Opened I2C device {} at address {:#04x}", path, address);
        Ok(I2cTransport { device })
    }
}

impl Transport for I2cTransport {
    fn read_word(&mut self, register: u8) -> Result<u16> {
        // SMBus words are little-endian on the wire, registers are big-endian
        Ok(self.device.smbus_read_word_data(register)?.swap_bytes())
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<()> {
        self.device
            .smbus_write_word_data(register, value.swap_bytes())?;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.device.write(data)?;
        Ok(())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<()> {
        self.device.read(buffer)?;
        Ok(())
    }
}
