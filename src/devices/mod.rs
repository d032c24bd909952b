//! Device implementations

mod ina219;
mod mcp23017;
mod wake;

pub use ina219::{Ina219, SenseRange};
pub use mcp23017::Mcp23017;
pub use wake::{GpioWake, PollWake};
