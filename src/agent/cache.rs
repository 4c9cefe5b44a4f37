//! Value-function memoization.
//!
//! Each agent owns one cache. Keys pair the identity of the reward function
//! being valued with the content identity of the world, which itself carries
//! the identity of the reward function governing the agent in that world.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::reward::{RewardFunction, RewardFunctionId};
use crate::world::{WorldKey, WorldState};

/// Cache key for `V(reward, world)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueKey {
    reward: RewardFunctionId,
    world: WorldKey,
}

impl ValueKey {
    /// Key for `V(reward, world)`.
    #[must_use]
    pub fn new(reward: &RewardFunction, world: &WorldState) -> Self {
        Self {
            reward: reward.id(),
            world: world.key(),
        }
    }
}

/// Unbounded value cache owned by a single agent.
///
/// Borrows never outlive a single lookup or insert, so evaluation may recurse
/// into the cache freely, including from inside reward corrections.
#[derive(Debug, Default)]
pub(crate) struct ValueCache {
    values: RefCell<HashMap<ValueKey, f64>>,
}

impl ValueCache {
    pub(crate) fn get(&self, key: &ValueKey) -> Option<f64> {
        self.values.borrow().get(key).copied()
    }

    pub(crate) fn insert(&self, key: ValueKey, value: f64) {
        self.values.borrow_mut().insert(key, value);
    }

    pub(crate) fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub(crate) fn clear(&self) {
        self.values.borrow_mut().clear();
    }
}
