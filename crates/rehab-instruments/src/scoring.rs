use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A closed numeric range with optional bounds and an optional step.
///
/// A missing bound means the range is open on that side. Bounds of zero are
/// real bounds: presence is tested, not truthiness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl ScoreRange {
    pub const UNBOUNDED: ScoreRange = ScoreRange {
        min: None,
        max: None,
        step: None,
    };

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
            step: None,
        }
    }

    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
            step: None,
        }
    }

    pub const fn with_step(self, step: f64) -> Self {
        Self {
            step: Some(step),
            ..self
        }
    }

    /// Non-finite values are never contained, even in an open range.
    pub fn contains(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        if let Some(min) = self.min
            && value < min
        {
            return false;
        }
        if let Some(max) = self.max
            && value > max
        {
            return false;
        }
        if let Some(step) = self.step {
            let offset = value - self.min.unwrap_or(0.0);
            let remainder = offset.rem_euclid(step);
            // Allow floating point tolerance
            remainder < 1e-9 || (step - remainder) < 1e-9
        } else {
            true
        }
    }
}

/// Renders as `"<min> - <max>"`, leaving an unbounded side empty.
impl fmt::Display for ScoreRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(min) = self.min {
            write!(f, "{min}")?;
        }
        f.write_str(" - ")?;
        if let Some(max) = self.max {
            write!(f, "{max}")?;
        }
        Ok(())
    }
}

/// Mean of `sum / count` rounded half up, as used by every level average.
///
/// `count` must be non-zero.
pub(crate) fn rounded_mean(sum: u32, count: u32) -> u8 {
    debug_assert!(count > 0);
    ((2 * sum + count) / (2 * count)) as u8
}
