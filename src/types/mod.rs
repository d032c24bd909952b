//! Plain value types shared across the daemon

mod battery;
mod buttons;

pub use battery::{BatteryReading, PowerSample};
pub use buttons::{Button, ButtonEvent};
