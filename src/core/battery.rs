//! Battery charge estimation by coulomb counting
//!
//! The estimator is seeded once from an instantaneous bus-voltage reading
//! (linear approximation of the Li-ion discharge curve), then integrates
//! current over elapsed time. Charging vs. discharging is classified from a
//! sliding window of recent current samples: one positive sample anywhere in
//! the window means a charger is (or was very recently) connected.

use super::window::SampleWindow;
use crate::types::BatteryReading;
use std::time::Duration;

/// Voltage span between 0% and 100% in the linear seed approximation
pub const VOLTAGE_SPAN_V: f64 = 3.6;

/// Running charge state. Owned by the battery monitor, never shared.
pub struct ChargeEstimator {
    capacity_mah: f64,
    capacity_max_mah: f64,
    min_voltage_v: f64,
    window: SampleWindow,
}

impl ChargeEstimator {
    /// Seed the estimate from a single bus-voltage reading.
    ///
    /// The initial fraction is `(bus_voltage - min_voltage) / 3.6` clamped to
    /// [0, 1], scaled to `capacity_max_mah`.
    pub fn seed(
        bus_voltage_v: f64,
        min_voltage_v: f64,
        capacity_max_mah: f64,
        window_samples: usize,
    ) -> Self {
        let fraction = ((bus_voltage_v - min_voltage_v) / VOLTAGE_SPAN_V).clamp(0.0, 1.0);
        Self {
            capacity_mah: fraction * capacity_max_mah,
            capacity_max_mah,
            min_voltage_v,
            window: SampleWindow::new(window_samples),
        }
    }

    /// Integrate one current sample over the elapsed interval.
    ///
    /// Accumulation is intentionally unclamped: the estimate may drift outside
    /// [0, capacity_max] when the voltage seed disagrees with the coulomb
    /// count, and the published percentage reflects that drift.
    pub fn update(&mut self, current_ma: f64, elapsed: Duration) -> BatteryReading {
        self.capacity_mah += current_ma * elapsed.as_secs_f64() / 3600.0;
        self.window.push(current_ma);

        BatteryReading {
            percentage: self.capacity_mah / self.capacity_max_mah,
            charging: self.window.any_positive(),
        }
    }

    /// Current charge estimate in mAh
    pub fn capacity_mah(&self) -> f64 {
        self.capacity_mah
    }

    /// Voltage defined as 0% charge
    pub fn min_voltage_v(&self) -> f64 {
        self.min_voltage_v
    }

    /// The current-sample window
    pub fn window(&self) -> &SampleWindow {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: usize = 128;

    #[test]
    fn seed_is_clamped_to_capacity_range() {
        let below = ChargeEstimator::seed(8.0, 9.0, 2500.0, WINDOW);
        assert_eq!(below.capacity_mah(), 0.0);

        let above = ChargeEstimator::seed(14.0, 9.0, 2500.0, WINDOW);
        assert_eq!(above.capacity_mah(), 2500.0);
    }

    #[test]
    fn seed_is_linear_and_monotonic_in_voltage() {
        let mid = ChargeEstimator::seed(9.0 + VOLTAGE_SPAN_V / 2.0, 9.0, 1000.0, WINDOW);
        assert!((mid.capacity_mah() - 500.0).abs() < 1e-9);

        let mut last = -1.0;
        for step in 0..=36 {
            let v = 9.0 + f64::from(step) * 0.1;
            let estimator = ChargeEstimator::seed(v, 9.0, 1000.0, WINDOW);
            let fraction = estimator.capacity_mah() / 1000.0;
            assert!((0.0..=1.0).contains(&fraction));
            assert!(fraction >= last);
            last = fraction;
        }
    }

    #[test]
    fn integration_is_deterministic() {
        // 100 mA for one hour adds exactly 100 mAh
        let mut estimator = ChargeEstimator::seed(12.6, 9.0, 1000.0, WINDOW);
        assert_eq!(estimator.capacity_mah(), 1000.0);

        let reading = estimator.update(100.0, Duration::from_secs(3600));
        assert_eq!(estimator.capacity_mah(), 1100.0);
        assert_eq!(reading.percentage, 1.1);

        // 100 mA for 3600 ms adds exactly 0.1 mAh
        let mut estimator = ChargeEstimator::seed(12.6, 9.0, 1000.0, WINDOW);
        estimator.update(100.0, Duration::from_millis(3600));
        assert!((estimator.capacity_mah() - 1000.1).abs() < 1e-9);
    }

    #[test]
    fn accumulation_is_not_clamped() {
        let mut estimator = ChargeEstimator::seed(12.6, 9.0, 1000.0, WINDOW);
        let reading = estimator.update(1000.0, Duration::from_secs(3600));
        assert!(reading.percentage > 1.0);

        let mut estimator = ChargeEstimator::seed(8.0, 9.0, 1000.0, WINDOW);
        let reading = estimator.update(-500.0, Duration::from_secs(3600));
        assert!(reading.percentage < 0.0);
    }

    #[test]
    fn charging_classification_follows_window_turnover() {
        let mut estimator = ChargeEstimator::seed(10.0, 9.0, 2500.0, WINDOW);

        for _ in 0..WINDOW {
            let reading = estimator.update(5.0, Duration::from_millis(200));
            assert!(reading.charging);
        }

        // discharging samples flip the classification only once the last
        // positive sample leaves the window
        let mut reading = estimator.update(-5.0, Duration::from_millis(200));
        assert!(reading.charging);
        for _ in 1..WINDOW {
            reading = estimator.update(-5.0, Duration::from_millis(200));
        }
        assert!(!reading.charging);
    }
}
