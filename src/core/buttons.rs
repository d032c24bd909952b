//! Edge-triggered button diffing

use crate::types::{Button, ButtonEvent};

/// Detects press/release edges between successive active-high masks.
///
/// `previous` always reflects the mask as of the last returned event batch;
/// it is updated in one step, never partially.
pub struct EdgeDetector {
    previous: u16,
}

impl EdgeDetector {
    /// Create a detector whose baseline is the given mask
    pub fn new(initial_mask: u16) -> Self {
        Self {
            previous: initial_mask,
        }
    }

    /// Diff a new mask against the previous one.
    ///
    /// Returns one event per changed button, in the canonical order of
    /// [`Button::ALL`] (face, D-pad, stick) regardless of which bits changed.
    /// An unchanged mask returns an empty list and leaves the baseline alone.
    pub fn diff(&mut self, mask: u16) -> Vec<ButtonEvent> {
        let changed = self.previous ^ mask;
        if changed == 0 {
            return Vec::new();
        }

        let events = Button::ALL
            .iter()
            .filter(|button| changed & button.bit() != 0)
            .map(|&button| ButtonEvent {
                button,
                pressed: mask & button.bit() != 0,
            })
            .collect();

        self.previous = mask;
        events
    }

    /// Mask as of the last emitted event batch
    pub fn previous_mask(&self) -> u16 {
        self.previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_press_emits_one_event() {
        let mut detector = EdgeDetector::new(0x0000);
        let events = detector.diff(0x0001);
        assert_eq!(
            events,
            vec![ButtonEvent {
                button: Button::Select,
                pressed: true,
            }]
        );
        assert_eq!(detector.previous_mask(), 0x0001);
    }

    #[test]
    fn unchanged_mask_is_a_no_op() {
        let mut detector = EdgeDetector::new(0x0000);
        detector.diff(0x0021);
        assert!(detector.diff(0x0021).is_empty());
        assert_eq!(detector.previous_mask(), 0x0021);
    }

    #[test]
    fn events_follow_canonical_order() {
        let mut detector = EdgeDetector::new(0x0000);
        // stick-up and select pressed in the same read: select is reported
        // first because face buttons precede the stick in canonical order
        let events = detector.diff(Button::StickUp.bit() | Button::Select.bit());
        let buttons: Vec<Button> = events.iter().map(|e| e.button).collect();
        assert_eq!(buttons, vec![Button::Select, Button::StickUp]);
        assert!(events.iter().all(|e| e.pressed));
    }

    #[test]
    fn release_and_press_in_one_batch() {
        let mut detector = EdgeDetector::new(Button::A.bit());
        let events = detector.diff(Button::PadLeft.bit());
        assert_eq!(
            events,
            vec![
                ButtonEvent {
                    button: Button::A,
                    pressed: false,
                },
                ButtonEvent {
                    button: Button::PadLeft,
                    pressed: true,
                },
            ]
        );
    }

    #[test]
    fn baseline_updates_atomically_with_batch() {
        let mut detector = EdgeDetector::new(0x0000);
        detector.diff(0x8001);
        // a second diff against the same mask sees no edges at all
        assert!(detector.diff(0x8001).is_empty());
        // and a release diffs against the full new baseline
        let events = detector.diff(0x8000);
        assert_eq!(
            events,
            vec![ButtonEvent {
                button: Button::Select,
                pressed: false,
            }]
        );
    }
}
