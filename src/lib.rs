//! PocketIO - hardware daemon for the Pocket handheld console
//!
//! Converts two periodically sampled I2C peripherals - an INA219 battery
//! gauge and an MCP23017 button matrix - into derived state: a coulomb-
//! counted charge estimate with charging classification, and discrete key
//! press/release events fed to a virtual keyboard.

pub mod app;
pub mod config;
pub mod core;
pub mod devices;
pub mod drivers;
pub mod error;
pub mod monitor;
pub mod sinks;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
