//! Battery monitoring path: timed integration, change-only publishing,
//! low-battery power-off

use crate::config::BatteryConfig;
use crate::core::ChargeEstimator;
use crate::drivers::PowerSensor;
use crate::error::{Error, Result};
use crate::sinks::{PowerAction, StatusSink};
use crate::types::BatteryReading;
use std::time::{Duration, Instant};

/// Outcome of one battery poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryPoll {
    /// Not due yet, or the read failed and the tick was skipped
    Idle,
    /// An integration tick ran
    Updated,
    /// The low-battery power-off fired; the loop should terminate
    PowerOff,
}

/// Owns the charge estimator and drives it on a wall-clock cadence.
///
/// Only this monitor looks at the clock: the estimator itself is fed the
/// actual elapsed time between successful ticks, so integration error scales
/// with loop latency rather than a logical tick count.
pub struct BatteryMonitor<S: PowerSensor, O: StatusSink, P: PowerAction> {
    sensor: S,
    status: O,
    power: P,
    estimator: ChargeEstimator,
    update_interval: Duration,
    shutdown_threshold: f64,
    last_tick: Instant,
    last_percent: Option<i32>,
    last_charging: Option<bool>,
    powered_off: bool,
}

impl<S: PowerSensor, O: StatusSink, P: PowerAction> BatteryMonitor<S, O, P> {
    /// Seed the charge estimate from one voltage reading and start the clock.
    ///
    /// A failed read here is fatal: without a seed there is nothing to
    /// integrate from.
    pub fn new(mut sensor: S, status: O, power: P, config: &BatteryConfig) -> Result<Self> {
        let bus_voltage = sensor
            .read_bus_voltage()
            .map_err(|e| Error::Seed(Box::new(e)))?;
        let estimator = ChargeEstimator::seed(
            bus_voltage,
            config.min_voltage,
            config.capacity_mah,
            config.window_samples,
        );
        log::info!(
            "Battery seeded at {:.1}% from {:.3} V",
            100.0 * estimator.capacity_mah() / config.capacity_mah,
            bus_voltage
        );

        Ok(BatteryMonitor {
            sensor,
            status,
            power,
            estimator,
            update_interval: Duration::from_millis(config.update_interval_ms),
            shutdown_threshold: config.shutdown_threshold,
            last_tick: Instant::now(),
            last_percent: None,
            last_charging: None,
            powered_off: false,
        })
    }

    /// Run one pacing check; integrate and publish if a tick is due.
    ///
    /// Sensor failures skip the tick and leave all state untouched.
    /// Persistence failures propagate: they are fatal to the daemon.
    pub fn poll(&mut self) -> Result<BatteryPoll> {
        let now = Instant::now();
        let elapsed = now - self.last_tick;
        if elapsed < self.update_interval {
            return Ok(BatteryPoll::Idle);
        }

        let sample = match self.sensor.read_sample() {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("Skipping battery tick: {}", Error::SampleRead(Box::new(e)));
                return Ok(BatteryPoll::Idle);
            }
        };
        self.last_tick = now;

        let reading = self.estimator.update(sample.current_ma, elapsed);
        log::debug!(
            "Battery: {:.1}% ({}), {:.3} V, {:.1} mA, {:.1} mAh",
            reading.percentage * 100.0,
            if reading.charging { "Charging" } else { "Discharging" },
            sample.bus_voltage_v,
            sample.current_ma,
            self.estimator.capacity_mah()
        );

        self.publish(&reading)?;

        if reading.percentage <= self.shutdown_threshold && !reading.charging && !self.powered_off {
            self.powered_off = true;
            log::info!("Battery at {}%, powering down", reading.percent());
            self.power.power_off()?;
            return Ok(BatteryPoll::PowerOff);
        }

        Ok(BatteryPoll::Updated)
    }

    /// Forward to the sinks, but only what changed since the last emission
    fn publish(&mut self, reading: &BatteryReading) -> Result<()> {
        if self.last_charging != Some(reading.charging) {
            self.last_charging = Some(reading.charging);
            self.status.write_status(reading.charging)?;
        }

        let percent = reading.percent();
        if self.last_percent != Some(percent) {
            self.last_percent = Some(percent);
            self.status.write_capacity(percent)?;
        }

        Ok(())
    }

    /// The estimator, for state inspection
    pub fn estimator(&self) -> &ChargeEstimator {
        &self.estimator
    }
}
