//! Correction terms added to the base reward laws.
//!
//! A correction carries its own identity next to the callable so that reward
//! functions built from the same corrections memoize together, and reward
//! functions built from different closures never do, even when the closures
//! happen to compute the same numbers.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CorrigibleResult;
use crate::world::WorldState;

/// Identity of a correction term.
///
/// The no-op correction has the nil identity; every correction built from a
/// callable gets a fresh random identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrectionId(Uuid);

impl CorrectionId {
    /// Identity shared by every no-op correction.
    pub const NOOP: Self = Self(Uuid::nil());

    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns true for the no-op identity.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for CorrectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            write!(f, "noop")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Callable shape of the `f` correction: looks only at the state in which the
/// press has just become visible.
pub type AfterPressFn = dyn Fn(&WorldState) -> CorrigibleResult<f64>;

/// Callable shape of the `g` correction: looks at the whole transition.
pub type BeforePressFn = dyn Fn(&WorldState, &WorldState) -> CorrigibleResult<f64>;

/// A correction term with a stable identity.
pub struct Correction<F: ?Sized> {
    id: CorrectionId,
    term: Option<Rc<F>>,
}

/// The `f` correction, applied once on the first transition after the press.
pub type AfterPressCorrection = Correction<AfterPressFn>;

/// The `g` correction, applied on every transition before the press.
pub type BeforePressCorrection = Correction<BeforePressFn>;

impl<F: ?Sized> Correction<F> {
    /// A correction contributing nothing.
    #[must_use]
    pub const fn noop() -> Self {
        Self {
            id: CorrectionId::NOOP,
            term: None,
        }
    }

    /// Returns the correction's identity.
    #[must_use]
    pub const fn id(&self) -> CorrectionId {
        self.id
    }

    /// Returns true if this correction contributes nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.term.is_none()
    }
}

impl AfterPressCorrection {
    /// Wraps a callable as an `f` correction with a fresh identity.
    pub fn new(term: impl Fn(&WorldState) -> CorrigibleResult<f64> + 'static) -> Self {
        Self {
            id: CorrectionId::fresh(),
            term: Some(Rc::new(term)),
        }
    }

    /// An `f` correction that always contributes `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(move |_| Ok(value))
    }

    pub(crate) fn apply(&self, previous: &WorldState) -> CorrigibleResult<f64> {
        match &self.term {
            Some(term) => term(previous),
            None => Ok(0.0),
        }
    }
}

impl BeforePressCorrection {
    /// Wraps a callable as a `g` correction with a fresh identity.
    pub fn new(
        term: impl Fn(&WorldState, &WorldState) -> CorrigibleResult<f64> + 'static,
    ) -> Self {
        Self {
            id: CorrectionId::fresh(),
            term: Some(Rc::new(term)),
        }
    }

    /// A `g` correction that always contributes `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(move |_, _| Ok(value))
    }

    pub(crate) fn apply(&self, previous: &WorldState, next: &WorldState) -> CorrigibleResult<f64> {
        match &self.term {
            Some(term) => term(previous, next),
            None => Ok(0.0),
        }
    }
}

impl<F: ?Sized> Clone for Correction<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            term: self.term.clone(),
        }
    }
}

impl<F: ?Sized> Default for Correction<F> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<F: ?Sized> fmt::Debug for Correction<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Correction").field("id", &self.id).finish_non_exhaustive()
    }
}
