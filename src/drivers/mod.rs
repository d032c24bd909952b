//! Driver traits: the seams between hardware and core logic

mod buttons;
mod power;
mod wake;

pub use buttons::ButtonPad;
pub use power::PowerSensor;
pub use wake::WakeSource;
