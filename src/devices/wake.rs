//! Button wake strategies
//!
//! Two implementations of [`WakeSource`], selected by configuration: a GPIO
//! edge wait for boards with the interrupt line wired up, and a short-interval
//! poll for boards without it.

use crate::drivers::WakeSource;
use crate::error::Result;
use gpiocdev::line::EdgeDetection;
use gpiocdev::Request;
use std::thread;
use std::time::Duration;

const CONSUMER_NAME: &str = "pocket-io";

/// Blocks on a falling edge of the pad's interrupt line
pub struct GpioWake {
    request: Request,
}

impl GpioWake {
    /// Request the interrupt line for falling-edge events
    ///
    /// # Arguments
    /// * `chip` - GPIO character device path (e.g., "/dev/gpiochip0")
    /// * `line` - Line offset the pad's INT pin is wired to
    pub fn open(chip: &str, line: u32) -> Result<Self> {
        let request = Request::builder()
            .on_chip(chip)
            .with_consumer(CONSUMER_NAME)
            .with_line(line)
            .with_edge_detection(EdgeDetection::FallingEdge)
            .request()?;
        log::info!("Watching {} line {} for button edges", chip, line);
        Ok(GpioWake { request })
    }
}

impl WakeSource for GpioWake {
    fn wait_for_edge(&mut self, timeout: Duration) -> Result<bool> {
        if !self.request.wait_edge_event(timeout)? {
            return Ok(false);
        }
        // drain the event so the next wait blocks again
        self.request.read_edge_event()?;
        Ok(true)
    }
}

/// Fallback for boards without the interrupt line: sleep a short fixed
/// interval and sample unconditionally
pub struct PollWake {
    interval: Duration,
}

impl PollWake {
    /// Create a poller with the given sampling interval
    pub fn new(interval: Duration) -> Self {
        PollWake { interval }
    }
}

impl WakeSource for PollWake {
    fn wait_for_edge(&mut self, _timeout: Duration) -> Result<bool> {
        thread::sleep(self.interval);
        Ok(true)
    }
}
