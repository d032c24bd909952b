//! Button pad driver trait

use crate::error::Result;

/// Button matrix driver trait.
///
/// `read_mask` returns the active-high logical mask: bit set means the button
/// is down. Implementations normalize hardware polarity before returning, so
/// callers never see active-low values.
pub trait ButtonPad {
    /// Read the current button mask (active-high, defined bits only)
    fn read_mask(&mut self) -> Result<u16>;
}
