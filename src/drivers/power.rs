//! Current/voltage sensor driver trait

use crate::error::Result;
use crate::types::PowerSample;

/// Current/voltage sense chip driver trait
pub trait PowerSensor {
    /// Read shunt current and bus voltage in one sample
    fn read_sample(&mut self) -> Result<PowerSample>;

    /// Read bus voltage alone (used to seed the charge estimate)
    fn read_bus_voltage(&mut self) -> Result<f64>;
}
