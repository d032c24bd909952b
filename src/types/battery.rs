//! Battery value types

/// One instantaneous reading from the current/voltage sense chip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSample {
    /// Shunt current in milliamps (positive = charging current flowing in)
    pub current_ma: f64,
    /// Bus voltage in volts
    pub bus_voltage_v: f64,
}

/// Derived battery state produced by one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    /// Fraction of full capacity. Not clamped: coulomb counting may drift
    /// outside [0, 1] when the linear voltage seed disagrees with reality.
    pub percentage: f64,
    /// True while any sample in the current window is a charging current
    pub charging: bool,
}

impl BatteryReading {
    /// Whole-percent value as published to the capacity sink
    pub fn percent(&self) -> i32 {
        (self.percentage * 100.0).round() as i32
    }
}
