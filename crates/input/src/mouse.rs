use glam::Vec2;
use serde::{Deserialize, Serialize};
use stagehand_common::{MathError, Span, remap};

/// One cursor reading from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseSample {
    pub button_down: bool,
    pub position: Vec2,
}

/// Double-buffered cursor state producing frame-to-frame deltas.
///
/// Both slots start zeroed with the button up. [`MouseTracker::delta`]
/// remaps the raw delta out of `source` (default `[-100, 100]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseTracker {
    previous: MouseSample,
    current: MouseSample,
    source: Span,
}

impl Default for MouseTracker {
    fn default() -> Self {
        Self::with_source(Self::DEFAULT_SOURCE)
    }
}

impl MouseTracker {
    pub const DEFAULT_SOURCE: Span = Span::new(-100.0, 100.0);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(source: Span) -> Self {
        Self {
            previous: MouseSample::default(),
            current: MouseSample::default(),
            source,
        }
    }

    pub fn source(&self) -> Span {
        self.source
    }

    pub fn set_source(&mut self, source: Span) {
        self.source = source;
    }

    /// Shift current into previous, then store the new sample.
    pub fn update(&mut self, button_down: bool, position: Vec2) {
        self.previous = self.current;
        self.current = MouseSample {
            button_down,
            position,
        };
    }

    pub fn previous(&self) -> MouseSample {
        self.previous
    }

    pub fn current(&self) -> MouseSample {
        self.current
    }

    pub fn previous_position(&self) -> Vec2 {
        self.previous.position
    }

    pub fn current_position(&self) -> Vec2 {
        self.current.position
    }

    /// Button held in both the previous and the current sample.
    pub fn is_dragging(&self) -> bool {
        self.previous.button_down && self.current.button_down
    }

    pub fn raw_delta(&self) -> Vec2 {
        self.current.position - self.previous.position
    }

    /// Raw delta remapped per component from the source span onto
    /// `[new_min, new_max]`, rounded to the nearest whole number.
    pub fn delta(&self, new_min: f32, new_max: f32) -> Result<Vec2, MathError> {
        let raw = self.raw_delta();
        let target = Span::new(new_min, new_max);
        Ok(Vec2::new(
            remap(raw.x, self.source, target)?,
            remap(raw.y, self.source, target)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let t = MouseTracker::new();
        assert_eq!(t.previous(), MouseSample::default());
        assert_eq!(t.current(), MouseSample::default());
        assert_eq!(t.raw_delta(), Vec2::ZERO);
        assert!(!t.is_dragging());
    }

    #[test]
    fn raw_delta_between_updates() {
        let mut t = MouseTracker::new();
        t.update(true, Vec2::new(10.0, 20.0));
        t.update(true, Vec2::new(13.0, 25.0));
        assert_eq!(t.raw_delta(), Vec2::new(3.0, 5.0));
        assert_eq!(t.previous_position(), Vec2::new(10.0, 20.0));
        assert_eq!(t.current_position(), Vec2::new(13.0, 25.0));
        assert!(t.is_dragging());
    }

    #[test]
    fn update_shifts_every_field() {
        let mut t = MouseTracker::new();
        t.update(true, Vec2::new(1.0, 1.0));
        t.update(false, Vec2::new(2.0, 2.0));
        assert!(t.previous().button_down);
        assert!(!t.current().button_down);
        assert!(!t.is_dragging());
    }

    #[test]
    fn normalized_delta() {
        let mut t = MouseTracker::new();
        t.update(false, Vec2::ZERO);
        t.update(false, Vec2::new(50.0, -100.0));
        // [-100, 100] onto [-10, 10]: slope 0.1
        assert_eq!(t.delta(-10.0, 10.0).unwrap(), Vec2::new(5.0, -10.0));
    }

    #[test]
    fn delta_rounds_to_nearest() {
        let mut t = MouseTracker::with_source(Span::new(0.0, 10.0));
        t.update(false, Vec2::ZERO);
        t.update(false, Vec2::new(6.0, 4.0));
        assert_eq!(t.delta(0.0, 1.0).unwrap(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn empty_source_span_is_an_error() {
        let mut t = MouseTracker::with_source(Span::new(5.0, 5.0));
        t.update(false, Vec2::new(1.0, 1.0));
        assert!(matches!(
            t.delta(-1.0, 1.0),
            Err(MathError::DegenerateRange { .. })
        ));
        // a failed query leaves the samples alone
        assert_eq!(t.current_position(), Vec2::new(1.0, 1.0));
    }
}
