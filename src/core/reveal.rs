//! Scroll-triggered reveal animations
//!
//! Each preset starts an element offset and transparent, and plays a single
//! transition to its resting place once the element's top edge crosses a
//! fraction of the viewport height.

/// CSS easing equivalent to a power3 ease-out
pub const EASE_OUT_CUBIC: &str = "cubic-bezier(0.215, 0.61, 0.355, 1)";

/// Reveal preset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPreset {
    /// CSS selector of the elements to animate
    pub selector: &'static str,
    /// Starting offset in px, (x, y)
    pub from: (f64, f64),
    /// Trigger when the element top is at or above this fraction of the viewport
    pub start: f64,
    pub duration_s: f64,
}

pub const SECTION_TITLE: RevealPreset = RevealPreset {
    selector: ".section-title",
    from: (0.0, 30.0),
    start: 0.80,
    duration_s: 1.0,
};

pub const FADE_UP: RevealPreset = RevealPreset {
    selector: "[data-gsap=\"fade-up\"]",
    from: (0.0, 60.0),
    start: 0.92,
    duration_s: 1.2,
};

pub const FADE_RIGHT: RevealPreset = RevealPreset {
    selector: "[data-gsap=\"fade-right\"]",
    from: (-100.0, 0.0),
    start: 0.92,
    duration_s: 1.4,
};

pub const FADE_LEFT: RevealPreset = RevealPreset {
    selector: "[data-gsap=\"fade-left\"]",
    from: (100.0, 0.0),
    start: 0.92,
    duration_s: 1.4,
};

pub const PRESETS: &[RevealPreset] = &[SECTION_TITLE, FADE_UP, FADE_RIGHT, FADE_LEFT];

/// Inline properties a reveal writes; all of them are removed once it settles
pub const STYLED_PROPERTIES: [&str; 3] = ["opacity", "transform", "transition"];

impl RevealPreset {
    /// Whether an element whose top is at `element_top` (viewport px) should play
    pub fn is_triggered(&self, element_top: f64, viewport_height: f64) -> bool {
        element_top <= viewport_height * self.start
    }

    /// Inline styles for the hidden starting state
    pub fn initial_style(&self) -> [(&'static str, String); 3] {
        [
            ("opacity", "0".to_string()),
            (
                "transform",
                format!("translate({}px, {}px)", self.from.0, self.from.1),
            ),
            ("transition", "none".to_string()),
        ]
    }

    /// Time after the reveal starts when its inline styles can be cleared
    pub fn settle_ms(&self) -> u32 {
        (self.duration_s * 1000.0).ceil() as u32
    }

    /// Inline styles that play the reveal
    pub fn revealed_style(&self) -> [(&'static str, String); 3] {
        [
            (
                "transition",
                format!(
                    "opacity {d}s {e}, transform {d}s {e}",
                    d = self.duration_s,
                    e = EASE_OUT_CUBIC
                ),
            ),
            ("opacity", "1".to_string()),
            ("transform", "translate(0px, 0px)".to_string()),
        ]
    }
}

/// Tracks which elements of a preset have already played
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    played: Vec<bool>,
}

impl RevealTracker {
    pub fn new(count: usize) -> Self {
        Self {
            played: vec![false; count],
        }
    }

    /// Indices that should start playing now, given each element's top edge.
    /// Each index is returned at most once over the tracker's lifetime.
    pub fn poll(&mut self, preset: &RevealPreset, tops: &[f64], viewport_height: f64) -> Vec<usize> {
        let mut newly = Vec::new();
        for (idx, &top) in tops.iter().enumerate() {
            let Some(played) = self.played.get_mut(idx) else {
                break;
            };
            if !*played && preset.is_triggered(top, viewport_height) {
                *played = true;
                newly.push(idx);
            }
        }
        newly
    }

    pub fn all_played(&self) -> bool {
        self.played.iter().all(|&p| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_thresholds() {
        assert!(SECTION_TITLE.is_triggered(800.0, 1000.0));
        assert!(!SECTION_TITLE.is_triggered(801.0, 1000.0));
        assert!(FADE_UP.is_triggered(920.0, 1000.0));
        assert!(!FADE_UP.is_triggered(921.0, 1000.0));
        // Already scrolled past
        assert!(FADE_LEFT.is_triggered(-300.0, 1000.0));
    }

    #[test]
    fn test_styles() {
        let initial = FADE_RIGHT.initial_style();
        assert_eq!(initial[1], ("transform", "translate(-100px, 0px)".to_string()));
        let revealed = FADE_UP.revealed_style();
        assert_eq!(
            revealed[0].1,
            "opacity 1.2s cubic-bezier(0.215, 0.61, 0.355, 1), transform 1.2s cubic-bezier(0.215, 0.61, 0.355, 1)"
        );
        assert_eq!(revealed[1], ("opacity", "1".to_string()));
    }

    #[test]
    fn test_cleanup_covers_every_styled_property() {
        for preset in PRESETS {
            for (property, _) in preset.initial_style().iter().chain(&preset.revealed_style()) {
                assert!(STYLED_PROPERTIES.contains(property), "{property} left behind");
            }
        }
        assert_eq!(FADE_RIGHT.settle_ms(), 1400);
        assert_eq!(SECTION_TITLE.settle_ms(), 1000);
    }

    #[test]
    fn test_tracker_plays_once() {
        let mut tracker = RevealTracker::new(3);
        assert_eq!(tracker.poll(&FADE_UP, &[100.0, 2000.0, 3000.0], 1000.0), vec![0]);
        assert_eq!(tracker.poll(&FADE_UP, &[-500.0, 900.0, 1500.0], 1000.0), vec![1]);
        assert!(!tracker.all_played());
        assert_eq!(tracker.poll(&FADE_UP, &[-900.0, 100.0, 500.0], 1000.0), vec![2]);
        assert!(tracker.all_played());
        assert!(tracker.poll(&FADE_UP, &[0.0, 0.0, 0.0], 1000.0).is_empty());
    }
}
