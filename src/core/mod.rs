//! Stateful estimation and event-diffing core
//!
//! Pure logic with no hardware or clock dependencies: the charge estimator
//! integrates timed current samples, the edge detector diffs button masks.
//! The monitors in [`crate::monitor`] drive both on a timed cadence.

mod battery;
mod buttons;
mod window;

pub use battery::{ChargeEstimator, VOLTAGE_SPAN_V};
pub use buttons::EdgeDetector;
pub use window::SampleWindow;
