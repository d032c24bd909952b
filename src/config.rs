//! Configuration for the PocketIO daemon
//!
//! Loads configuration from a TOML file. All values are fixed at startup;
//! there is no reload mechanism.

use crate::devices::SenseRange;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub hardware: HardwareConfig,
    pub battery: BatteryConfig,
    pub buttons: ButtonConfig,
    pub logging: LoggingConfig,
}

/// Hardware configuration (bus paths and chip addresses)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HardwareConfig {
    /// I2C bus device both chips sit on
    pub i2c_bus: String,
    /// Sense chip slave address
    pub power_monitor_addr: u16,
    /// Button pad slave address
    pub button_pad_addr: u16,
    /// GPIO character device carrying the pad's interrupt line
    pub gpiochip: String,
    /// Line offset the pad's INT pin is wired to
    pub interrupt_line: u32,
}

/// Battery estimation and publishing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatteryConfig {
    /// Bus voltage defined as 0% charge
    pub min_voltage: f64,
    /// Full-charge capacity in mAh
    pub capacity_mah: f64,
    /// Minimum time between integration ticks
    pub update_interval_ms: u64,
    /// Power off when the charge fraction drops to this while discharging
    pub shutdown_threshold: f64,
    /// Current samples kept for the charging classification
    pub window_samples: usize,
    /// Sense chip range profile
    pub sense_range: SenseRange,
    /// Directory for the status/capacity files
    pub output_dir: String,
    /// Command run when the shutdown threshold is reached
    pub poweroff_command: String,
}

/// Button path configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ButtonConfig {
    /// How the loop learns of button activity
    pub wake: WakeStrategy,
    /// Sampling interval in the `poll` strategy
    pub poll_interval_ms: u64,
    /// Name the virtual keyboard registers under
    pub device_name: String,
}

/// Wake strategy for the button path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WakeStrategy {
    /// Block on the pad's GPIO interrupt line
    Interrupt,
    /// Sample unconditionally at a short fixed interval
    Poll,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration for the Pocket handheld
    pub fn pocket_defaults() -> Self {
        Self {
            hardware: HardwareConfig {
                i2c_bus: "/dev/i2c-1".to_string(),
                power_monitor_addr: 0x41,
                button_pad_addr: 0x26,
                gpiochip: "/dev/gpiochip0".to_string(),
                interrupt_line: 17,
            },
            battery: BatteryConfig {
                min_voltage: 9.0,
                capacity_mah: 2500.0,
                update_interval_ms: 200,
                shutdown_threshold: 0.1,
                window_samples: 128,
                sense_range: SenseRange::Range16V5A,
                output_dir: "/run/bat".to_string(),
                poweroff_command: "/sbin/poweroff".to_string(),
            },
            buttons: ButtonConfig {
                wake: WakeStrategy::Interrupt,
                poll_interval_ms: 10,
                device_name: "Pocket Controller".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.battery.shutdown_threshold) {
            return Err(Error::InvalidConfig(format!(
                "shutdown_threshold must be within [0, 1], got {}",
                self.battery.shutdown_threshold
            )));
        }
        if self.battery.window_samples == 0 {
            return Err(Error::InvalidConfig(
                "window_samples must be at least 1".to_string(),
            ));
        }
        if self.buttons.poll_interval_ms == 0 {
            return Err(Error::InvalidConfig(
                "poll_interval_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::pocket_defaults()
    }
}
