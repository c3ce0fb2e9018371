use serde::{Deserialize, Serialize};

use crate::MathError;

/// A closed numeric interval `[low, high]` used as a remap source or target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub low: f32,
    pub high: f32,
}

impl Span {
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f32 {
        self.high - self.low
    }
}

/// Linearly maps `value` from `original` onto `target`, rounding to the
/// nearest whole number: `floor(slope * (value - original.low) + 0.5)`
/// offset by `target.low`.
///
/// An empty `original` span has no slope and is rejected.
pub fn remap(value: f32, original: Span, target: Span) -> Result<f32, MathError> {
    let width = original.width();
    if width == 0.0 || !width.is_finite() {
        return Err(MathError::DegenerateRange {
            low: original.low,
            high: original.high,
        });
    }
    let slope = target.width() / width;
    Ok(target.low + (slope * (value - original.low) + 0.5).floor())
}
