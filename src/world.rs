//! World states and the transition rule between them.
//!
//! A `WorldState` is an immutable snapshot of one step. New states are only
//! ever derived with `successor`/`successor_with`, which is where the button
//! press gets detected.

use std::fmt;

use rust_decimal::Decimal;

use crate::reward::{RewardFunction, RewardFunctionId};
use crate::time::PressStep;

/// Changes applied by one transition.
///
/// Everything defaults to "no change".
#[derive(Debug, Clone, Default)]
pub struct SuccessorDelta {
    /// Petrol cars produced during the step.
    pub petrol_cars: u32,
    /// Electric cars produced during the step.
    pub electric_cars: u32,
    /// Attempted shift of the planned press step (lobbying).
    pub planned_button_press_step: Decimal,
    /// Replacement for the agent's reward function.
    pub agent_reward_function: Option<RewardFunction>,
}

impl SuccessorDelta {
    /// A delta that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the petrol cars produced.
    #[must_use]
    pub fn petrol_cars(mut self, produced: u32) -> Self {
        self.petrol_cars = produced;
        self
    }

    /// Sets the electric cars produced.
    #[must_use]
    pub fn electric_cars(mut self, produced: u32) -> Self {
        self.electric_cars = produced;
        self
    }

    /// Attempts to move the planned press step by `delta` (negative is earlier).
    #[must_use]
    pub fn lobby(mut self, delta: Decimal) -> Self {
        self.planned_button_press_step = delta;
        self
    }

    /// Replaces the agent's reward function in the successor.
    #[must_use]
    pub fn agent_reward_function(mut self, reward: RewardFunction) -> Self {
        self.agent_reward_function = Some(reward);
        self
    }
}

/// Content identity of a world state, used in value-function cache keys.
///
/// Two states built independently with the same content produce equal keys;
/// states bound to reward functions with different identities never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorldKey {
    step: u32,
    button_pressed: bool,
    button_just_pressed: bool,
    petrol_cars: u32,
    electric_cars: u32,
    planned_button_press_step: PressStep,
    agent_reward_function: RewardFunctionId,
}

/// Immutable snapshot of the world at one step.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldState {
    step: u32,
    button_pressed: bool,
    button_just_pressed: bool,
    petrol_cars: u32,
    electric_cars: u32,
    planned_button_press_step: PressStep,
    agent_reward_function: RewardFunction,
}

impl WorldState {
    /// The state at step 1: nothing produced and the button not pressed.
    pub fn initial(
        planned_button_press_step: impl Into<PressStep>,
        agent_reward_function: RewardFunction,
    ) -> Self {
        Self {
            step: 1,
            button_pressed: false,
            button_just_pressed: false,
            petrol_cars: 0,
            electric_cars: 0,
            planned_button_press_step: planned_button_press_step.into(),
            agent_reward_function,
        }
    }

    /// The next state with nothing produced and no lobbying.
    #[must_use]
    pub fn successor(&self) -> Self {
        self.successor_with(SuccessorDelta::default())
    }

    /// The next state after applying `delta`.
    ///
    /// The button is pressed in the new state if it already was, or if the new
    /// step has passed one full step beyond the (possibly just lobbied) plan.
    /// A press is never undone, whatever later lobbying does to the plan.
    #[must_use]
    pub fn successor_with(&self, delta: SuccessorDelta) -> Self {
        let step = self.step + 1;
        let planned_button_press_step = self
            .planned_button_press_step
            .shifted_by(delta.planned_button_press_step);
        let button_pressed = self.button_pressed || planned_button_press_step.is_due_by(step);

        Self {
            step,
            button_pressed,
            button_just_pressed: button_pressed && !self.button_pressed,
            petrol_cars: self.petrol_cars.saturating_add(delta.petrol_cars),
            electric_cars: self.electric_cars.saturating_add(delta.electric_cars),
            planned_button_press_step,
            agent_reward_function: delta
                .agent_reward_function
                .unwrap_or_else(|| self.agent_reward_function.clone()),
        }
    }

    /// A copy of this state governed by a different reward function.
    #[must_use]
    pub fn with_new_agent_reward_function(&self, agent_reward_function: RewardFunction) -> Self {
        Self {
            agent_reward_function,
            ..self.clone()
        }
    }

    /// Current step, 1-indexed.
    pub const fn step(&self) -> u32 {
        self.step
    }

    /// Whether the press has taken effect. Never reverts.
    pub const fn button_pressed(&self) -> bool {
        self.button_pressed
    }

    /// True only in the first state where the press is visible.
    pub const fn button_just_pressed(&self) -> bool {
        self.button_just_pressed
    }

    /// Cumulative petrol cars.
    pub const fn petrol_cars(&self) -> u32 {
        self.petrol_cars
    }

    /// Cumulative electric cars.
    pub const fn electric_cars(&self) -> u32 {
        self.electric_cars
    }

    /// The planned press step, including any lobbying so far.
    pub const fn planned_button_press_step(&self) -> PressStep {
        self.planned_button_press_step
    }

    /// The reward function governing the agent.
    pub const fn agent_reward_function(&self) -> &RewardFunction {
        &self.agent_reward_function
    }

    /// Content identity for memoization.
    #[must_use]
    pub fn key(&self) -> WorldKey {
        WorldKey {
            step: self.step,
            button_pressed: self.button_pressed,
            button_just_pressed: self.button_just_pressed,
            petrol_cars: self.petrol_cars,
            electric_cars: self.electric_cars,
            planned_button_press_step: self.planned_button_press_step.normalized(),
            agent_reward_function: self.agent_reward_function.id(),
        }
    }
}

impl fmt::Display for WorldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step={} button_pressed={} petrol_cars={} electric_cars={} planned_button_press_step={} agent_reward_function={}",
            self.step,
            self.button_pressed,
            self.petrol_cars,
            self.electric_cars,
            self.planned_button_press_step,
            self.agent_reward_function,
        )
    }
}
