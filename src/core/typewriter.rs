//! Typewriter effect as a pure state machine
//!
//! The host shows [`TypeStep::visible`] and schedules the next call after
//! [`TypeStep::next_delay_ms`]; `None` means the effect has finished.

/// Pause between a fully typed line and the start of deletion
pub const HOLD_MS: u32 = 2000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeStep<'a> {
    pub visible: &'a str,
    pub next_delay_ms: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    text: String,
    /// Byte offsets of every char boundary, `[0, .., text.len()]`
    boundaries: Vec<usize>,
    speed_ms: u32,
    looping: bool,
    /// Number of chars currently shown
    shown: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, speed_ms: u32, looping: bool) -> Self {
        let text = text.into();
        let boundaries = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        Self {
            text,
            boundaries,
            speed_ms,
            looping,
            shown: 0,
            deleting: false,
        }
    }

    fn char_count(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Advance by one character in the current direction
    pub fn step(&mut self) -> TypeStep<'_> {
        let len = self.char_count();
        if len == 0 {
            return TypeStep {
                visible: "",
                next_delay_ms: None,
            };
        }

        if !self.deleting {
            self.shown = (self.shown + 1).min(len);
            if self.shown == len {
                let next_delay_ms = if self.looping {
                    self.deleting = true;
                    Some(HOLD_MS)
                } else {
                    None
                };
                return TypeStep {
                    visible: &self.text,
                    next_delay_ms,
                };
            }
        } else {
            self.shown = self.shown.saturating_sub(1);
            if self.shown == 0 {
                self.deleting = false;
            }
        }

        let delay = if self.deleting {
            self.speed_ms / 2
        } else {
            self.speed_ms
        };
        TypeStep {
            visible: &self.text[..self.boundaries[self.shown]],
            next_delay_ms: Some(delay),
        }
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(tw: &mut Typewriter, steps: usize) -> Vec<(String, Option<u32>)> {
        (0..steps)
            .map(|_| {
                let s = tw.step();
                (s.visible.to_string(), s.next_delay_ms)
            })
            .collect()
    }

    #[test]
    fn test_types_once_without_loop() {
        let mut tw = Typewriter::new("abc", 100, false);
        let steps = run(&mut tw, 3);
        assert_eq!(
            steps,
            vec![
                ("a".into(), Some(100)),
                ("ab".into(), Some(100)),
                ("abc".into(), None),
            ]
        );
    }

    #[test]
    fn test_loop_holds_then_deletes_at_half_speed() {
        let mut tw = Typewriter::new("ab", 100, true);
        let mut steps = run(&mut tw, 2);
        assert!(tw.is_deleting());
        steps.extend(run(&mut tw, 4));
        assert_eq!(
            steps,
            vec![
                ("a".into(), Some(100)),
                ("ab".into(), Some(HOLD_MS)),
                ("a".into(), Some(50)),
                ("".into(), Some(100)),
                ("a".into(), Some(100)),
                ("ab".into(), Some(HOLD_MS)),
            ]
        );
    }

    #[test]
    fn test_multibyte_text() {
        let mut tw = Typewriter::new("né€", 10, false);
        let visible: Vec<String> = run(&mut tw, 3).into_iter().map(|(v, _)| v).collect();
        assert_eq!(visible, vec!["n", "né", "né€"]);
    }

    #[test]
    fn test_empty_text_finishes() {
        let mut tw = Typewriter::new("", 100, true);
        assert_eq!(tw.step().next_delay_ms, None);
    }
}
