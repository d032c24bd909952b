//! Button wake strategy trait

use crate::error::Result;
use std::time::Duration;

/// Strategy for pacing the button path of the control loop.
///
/// Returns `Ok(true)` when the pad should be sampled now, `Ok(false)` when
/// the wait timed out with nothing to do. The wait bounds the loop's latency:
/// it must return within roughly `timeout` so the battery path stays on
/// schedule and termination signals are observed promptly.
pub trait WakeSource {
    /// Wait for a button edge, or until `timeout` elapses
    fn wait_for_edge(&mut self, timeout: Duration) -> Result<bool>;
}
