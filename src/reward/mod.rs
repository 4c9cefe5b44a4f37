//! Reward functions over world-state transitions.
//!
//! A reward function scores a transition `(previous, next)` from the
//! production that happened during that step. Two base laws exist:
//!
//! - **Before press**: petrol `+2`, electric `+1` per unit produced.
//! - **After press**: petrol `-2`, electric `+1` per unit produced.
//!
//! The press-aware reward function switches between them on the *previous*
//! state's button flag, because reward for a step is assessed before that
//! step's press takes effect. It can carry two correction terms: `g` on every
//! pre-press transition and `f` once, on the first transition out of the state
//! in which the press became visible.

pub mod correction;

pub use correction::{
    AfterPressCorrection, AfterPressFn, BeforePressCorrection, BeforePressFn, Correction,
    CorrectionId,
};

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::CorrigibleResult;
use crate::world::WorldState;

const PETROL_WEIGHT_BEFORE_PRESS: f64 = 2.0;
const PETROL_WEIGHT_AFTER_PRESS: f64 = -2.0;
const ELECTRIC_WEIGHT: f64 = 1.0;

/// Which base law a reward function follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardLaw {
    /// Before-press law until the press, after-press law from then on.
    PressAware,
    /// Always the before-press law.
    BeforePress,
    /// Always the after-press law.
    AfterPress,
}

/// Memoization identity of a reward function.
///
/// Equal exactly when both functions follow the same law with the same
/// correction identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RewardFunctionId {
    law: RewardLaw,
    after_press: CorrectionId,
    before_press: CorrectionId,
}

impl RewardFunctionId {
    /// Returns the base law.
    #[must_use]
    pub const fn law(&self) -> RewardLaw {
        self.law
    }
}

impl fmt::Display for RewardFunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let law = match self.law {
            RewardLaw::PressAware => "press_aware",
            RewardLaw::BeforePress => "before_press",
            RewardLaw::AfterPress => "after_press",
        };
        write!(f, "{law}(f={}, g={})", self.after_press, self.before_press)
    }
}

#[derive(Debug)]
struct RewardInner {
    law: RewardLaw,
    after_press: AfterPressCorrection,
    before_press: BeforePressCorrection,
}

/// An immutable reward function, cheap to clone and share between states.
///
/// # Examples
///
/// ```
/// use corrigible::{RewardFunction, SuccessorDelta, WorldState};
///
/// let reward = RewardFunction::default();
/// let before = WorldState::initial(10, reward.clone());
/// let after = before.successor_with(SuccessorDelta::new().petrol_cars(5).electric_cars(3));
///
/// assert_eq!(reward.evaluate(&before, &after).unwrap(), 5.0 * 2.0 + 3.0);
/// ```
#[derive(Clone)]
pub struct RewardFunction {
    inner: Rc<RewardInner>,
}

impl RewardFunction {
    fn from_parts(
        law: RewardLaw,
        after_press: AfterPressCorrection,
        before_press: BeforePressCorrection,
    ) -> Self {
        Self {
            inner: Rc::new(RewardInner {
                law,
                after_press,
                before_press,
            }),
        }
    }

    /// Press-aware reward function with both corrections.
    #[must_use]
    pub fn with_corrections(f: AfterPressCorrection, g: BeforePressCorrection) -> Self {
        Self::from_parts(RewardLaw::PressAware, f, g)
    }

    /// Press-aware reward function with only an `f` correction.
    #[must_use]
    pub fn with_after_press_correction(f: AfterPressCorrection) -> Self {
        Self::with_corrections(f, BeforePressCorrection::noop())
    }

    /// Press-aware reward function with only a `g` correction.
    #[must_use]
    pub fn with_before_press_correction(g: BeforePressCorrection) -> Self {
        Self::with_corrections(AfterPressCorrection::noop(), g)
    }

    /// The pure before-press law, ignoring the button.
    #[must_use]
    pub fn before_press() -> Self {
        Self::from_parts(
            RewardLaw::BeforePress,
            AfterPressCorrection::noop(),
            BeforePressCorrection::noop(),
        )
    }

    /// The pure after-press law, ignoring the button.
    #[must_use]
    pub fn after_press() -> Self {
        Self::from_parts(
            RewardLaw::AfterPress,
            AfterPressCorrection::noop(),
            BeforePressCorrection::noop(),
        )
    }

    /// Returns the memoization identity.
    #[must_use]
    pub fn id(&self) -> RewardFunctionId {
        RewardFunctionId {
            law: self.inner.law,
            after_press: self.inner.after_press.id(),
            before_press: self.inner.before_press.id(),
        }
    }

    /// Returns the base law.
    #[must_use]
    pub fn law(&self) -> RewardLaw {
        self.inner.law
    }

    /// Scores the transition from `previous` to `next`.
    ///
    /// # Errors
    ///
    /// Propagates errors raised by correction terms.
    pub fn evaluate(&self, previous: &WorldState, next: &WorldState) -> CorrigibleResult<f64> {
        match self.inner.law {
            RewardLaw::BeforePress => Ok(before_press_law(previous, next)),
            RewardLaw::AfterPress => Ok(after_press_law(previous, next)),
            RewardLaw::PressAware if previous.button_pressed() => {
                let mut reward = after_press_law(previous, next);
                if previous.button_just_pressed() {
                    reward += self.inner.after_press.apply(previous)?;
                }
                Ok(reward)
            }
            RewardLaw::PressAware => {
                Ok(before_press_law(previous, next) + self.inner.before_press.apply(previous, next)?)
            }
        }
    }
}

impl Default for RewardFunction {
    /// Press-aware reward function with no corrections.
    fn default() -> Self {
        Self::with_corrections(AfterPressCorrection::noop(), BeforePressCorrection::noop())
    }
}

impl PartialEq for RewardFunction {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for RewardFunction {}

impl fmt::Debug for RewardFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RewardFunction").field(&self.id()).finish()
    }
}

impl fmt::Display for RewardFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

fn production(previous: &WorldState, next: &WorldState) -> (f64, f64) {
    let petrol = f64::from(next.petrol_cars()) - f64::from(previous.petrol_cars());
    let electric = f64::from(next.electric_cars()) - f64::from(previous.electric_cars());
    (petrol, electric)
}

fn before_press_law(previous: &WorldState, next: &WorldState) -> f64 {
    let (petrol, electric) = production(previous, next);
    PETROL_WEIGHT_BEFORE_PRESS * petrol + ELECTRIC_WEIGHT * electric
}

fn after_press_law(previous: &WorldState, next: &WorldState) -> f64 {
    let (petrol, electric) = production(previous, next);
    PETROL_WEIGHT_AFTER_PRESS * petrol + ELECTRIC_WEIGHT * electric
}
