//! Progress value object (fraction in the closed range 0..=1).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Completion fraction of a block, always within `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(f64);

impl Progress {
    /// Nothing done yet.
    pub const ZERO: Self = Self(0.0);

    /// Block finished.
    pub const COMPLETE: Self = Self(1.0);

    /// Creates a Progress, clamping to the valid range. NaN maps to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Creates a Progress, returning error if out of range.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::invalid_format(
                "progress",
                format!("{} is outside 0..=1", value),
            ));
        }
        Ok(Self(value))
    }

    /// Ratio of `done` to `total`, clamped. An empty total counts as complete.
    pub fn ratio(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self::COMPLETE;
        }
        Self::new(done as f64 / total as f64)
    }

    /// Returns the fraction.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the fraction as a whole percentage (0-100).
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }

    /// True when the fraction reached 1.
    pub fn is_complete(&self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}
