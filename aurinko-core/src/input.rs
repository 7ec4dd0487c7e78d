//! Front-panel button click detection
//!
//! The single button is sampled once per control cycle. Holding it for the
//! threshold number of cycles produces a long click the moment the
//! threshold is reached; releasing it earlier produces a short click.

use crate::config::LONG_CLICK_CYCLES;
use crate::menu::ButtonEvent;

/// Per-cycle click detector
#[derive(Debug, Clone)]
pub struct ClickDetector {
    threshold: u16,
    held_cycles: u16,
    pressed: bool,
}

impl Default for ClickDetector {
    fn default() -> Self {
        Self::new(LONG_CLICK_CYCLES)
    }
}

impl ClickDetector {
    /// Create a detector with a long-click threshold in cycles
    pub const fn new(threshold: u16) -> Self {
        Self {
            threshold,
            held_cycles: 0,
            pressed: false,
        }
    }

    /// Feed one button sample and get the resulting event
    pub fn poll(&mut self, pressed: bool) -> ButtonEvent {
        match (self.pressed, pressed) {
            (false, false) => ButtonEvent::NoClick,
            (false, true) => {
                self.pressed = true;
                self.held_cycles = 0;
                ButtonEvent::NoClick
            }
            (true, true) => {
                if self.held_cycles < self.threshold {
                    self.held_cycles += 1;
                    if self.held_cycles == self.threshold {
                        return ButtonEvent::LongClick;
                    }
                }
                ButtonEvent::NoClick
            }
            (true, false) => {
                let short = self.held_cycles < self.threshold;
                self.reset();
                if short {
                    ButtonEvent::ShortClick
                } else {
                    ButtonEvent::NoClick
                }
            }
        }
    }

    /// Forget any press in progress
    pub fn reset(&mut self) {
        self.pressed = false;
        self.held_cycles = 0;
    }

    /// Check if the button is currently held
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(detector: &mut ClickDetector, samples: &[bool]) -> [usize; 3] {
        let mut counts = [0; 3];
        for &sample in samples {
            match detector.poll(sample) {
                ButtonEvent::NoClick => counts[0] += 1,
                ButtonEvent::ShortClick => counts[1] += 1,
                ButtonEvent::LongClick => counts[2] += 1,
            }
        }
        counts
    }

    #[test]
    fn test_idle_is_no_click() {
        let mut detector = ClickDetector::default();
        assert_eq!(feed(&mut detector, &[false; 50]), [50, 0, 0]);
    }

    #[test]
    fn test_short_click_on_release() {
        let mut detector = ClickDetector::new(20);
        for _ in 0..5 {
            assert_eq!(detector.poll(true), ButtonEvent::NoClick);
        }
        assert!(detector.is_pressed());
        assert_eq!(detector.poll(false), ButtonEvent::ShortClick);
        assert!(!detector.is_pressed());
    }

    #[test]
    fn test_long_click_fires_once_at_threshold() {
        let mut detector = ClickDetector::new(20);
        // First sample arms, the next 20 count up to the threshold
        for _ in 0..20 {
            assert_eq!(detector.poll(true), ButtonEvent::NoClick);
        }
        assert_eq!(detector.poll(true), ButtonEvent::LongClick);
        for _ in 0..100 {
            assert_eq!(detector.poll(true), ButtonEvent::NoClick);
        }
        // Releasing after a long click produces nothing
        assert_eq!(detector.poll(false), ButtonEvent::NoClick);
    }

    #[test]
    fn test_clicks_repeat() {
        let mut detector = ClickDetector::new(3);
        let samples = [true, false, true, true, true, true, false, true, false];
        assert_eq!(feed(&mut detector, &samples), [6, 2, 1]);
    }
}
