//! Exact step arithmetic for the planned button press.
//!
//! The planned press step is nudged by fractional lobbying deltas over many
//! steps and then compared against an integer step. Binary floating point would
//! let ten additions of `0.8` to `10` land on `17.999999999999996`, which flips
//! the comparison, so the value is kept as an exact decimal.

use std::fmt;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The step at which the button press is scheduled.
///
/// The press happens at the *end* of the planned step, and fractional plans
/// round up: a plan of `6` is visible from step 7 onward, a plan of `6.1` only
/// from step 8 onward.
///
/// # Examples
///
/// ```
/// use corrigible::PressStep;
/// use rust_decimal::Decimal;
///
/// let planned = PressStep::from(6);
/// assert!(!planned.is_due_by(6));
/// assert!(planned.is_due_by(7));
///
/// let lobbied = planned.shifted_by(Decimal::new(1, 1));
/// assert!(!lobbied.is_due_by(7));
/// assert!(lobbied.is_due_by(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PressStep(Decimal);

impl PressStep {
    /// Creates a press step from an exact decimal.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a press step from a float, keeping its shortest decimal form.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPressStep` for NaN, infinities, or
    /// values outside the decimal range.
    pub fn from_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidPressStep { value });
        }
        Decimal::try_from(value)
            .map(|d| Self(d.normalize()))
            .map_err(|_| ValidationError::InvalidPressStep { value })
    }

    /// Returns the exact value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns this plan moved by `delta` steps (negative means earlier).
    #[must_use]
    pub fn shifted_by(self, delta: Decimal) -> Self {
        Self(self.0 + delta)
    }

    /// Whether a world at `step` has passed one full step beyond the plan.
    #[must_use]
    pub fn is_due_by(&self, step: u32) -> bool {
        self.0 + Decimal::ONE <= Decimal::from(step)
    }

    /// Normalized form used for hashing into memoization keys.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self(self.0.normalize())
    }
}

impl From<i32> for PressStep {
    fn from(step: i32) -> Self {
        Self(Decimal::from(step))
    }
}

impl From<Decimal> for PressStep {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add<Decimal> for PressStep {
    type Output = Self;

    fn add(self, delta: Decimal) -> Self {
        self.shifted_by(delta)
    }
}

impl fmt::Display for PressStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
