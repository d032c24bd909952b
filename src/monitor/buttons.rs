//! Button monitoring path: wake, read, diff, emit

use crate::core::EdgeDetector;
use crate::drivers::{ButtonPad, WakeSource};
use crate::error::{Error, Result};
use crate::sinks::KeySink;
use std::time::Duration;

/// Owns the edge detector and forwards press/release events to the key sink.
///
/// The wake strategy is chosen at startup (GPIO interrupt or polling) and
/// hidden behind the trait object; the monitor is indifferent to which one
/// paces it.
pub struct ButtonMonitor<B: ButtonPad, K: KeySink> {
    pad: B,
    keys: K,
    wake: Box<dyn WakeSource>,
    detector: EdgeDetector,
}

impl<B: ButtonPad, K: KeySink> ButtonMonitor<B, K> {
    /// Read the initial mask so the first diff sees only real edges
    pub fn new(mut pad: B, keys: K, wake: Box<dyn WakeSource>) -> Result<Self> {
        let initial_mask = pad.read_mask()?;
        Ok(ButtonMonitor {
            pad,
            keys,
            wake,
            detector: EdgeDetector::new(initial_mask),
        })
    }

    /// Wait for a wake, then read and diff the pad once.
    ///
    /// Wake and read failures skip the cycle with a warning; the previous
    /// mask is preserved so no edge is lost, only delayed. Key-sink failures
    /// propagate.
    pub fn poll(&mut self, timeout: Duration) -> Result<()> {
        match self.wake.wait_for_edge(timeout) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            Err(e) => {
                log::warn!("Button wake failed: {}", e);
                return Ok(());
            }
        }

        let mask = match self.pad.read_mask() {
            Ok(mask) => mask,
            Err(e) => {
                log::warn!("Skipping button read: {}", Error::SampleRead(Box::new(e)));
                return Ok(());
            }
        };

        let events = self.detector.diff(mask);
        if events.is_empty() {
            return Ok(());
        }

        for event in &events {
            log::debug!(
                "Button {:?} {}",
                event.button,
                if event.pressed { "pressed" } else { "released" }
            );
            self.keys.emit(event.button, event.pressed)?;
        }
        self.keys.flush()
    }
}
