//! Simulations: action spaces, stochastic transitions, and rollouts.
//!
//! A simulation fixes which actions exist, how far the horizon reaches, and
//! the distribution over successor states each action produces. The provided
//! methods sample from those distributions and drive an agent through them.

pub mod basic;
pub mod config;
pub mod result;

pub use basic::{BasicAction, BasicSimulation};
pub use config::SimulationConfig;
pub use result::{SimulationResult, PRESS_MARKER};

use std::fmt;
use std::hash::Hash;

use rand::Rng;
use tracing::{debug, trace};

use crate::agent::Agent;
use crate::error::{ConfigurationError, CorrigibleError, CorrigibleResult};
use crate::world::WorldState;

/// How far successor probabilities may drift from 1 before the distribution
/// is rejected.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// An action an agent can take.
pub trait Action: Copy + Eq + Hash + fmt::Debug {
    /// One-character code used in traces.
    fn code(&self) -> char;
}

/// Successor distribution: `(probability, state)` pairs.
pub type Successors = Vec<(f64, WorldState)>;

/// A fully known, discrete-time world model.
pub trait Simulation {
    /// The action alphabet.
    type Action: Action;

    /// Every action, in tie-break order.
    fn possible_actions(&self) -> &[Self::Action];

    /// Last step at which the agent acts.
    fn total_steps(&self) -> u32;

    /// Distribution over states following `previous` when taking `action`.
    ///
    /// Probabilities must sum to 1.
    fn successor_world_states(&self, previous: &WorldState, action: Self::Action) -> Successors;

    /// `successor_world_states`, rejecting empty distributions and
    /// distributions that do not sum to 1.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::EmptyDistribution` or
    /// `ConfigurationError::ProbabilitiesDoNotSumToOne`.
    fn checked_successor_world_states(
        &self,
        previous: &WorldState,
        action: Self::Action,
    ) -> CorrigibleResult<Successors> {
        let successors = self.successor_world_states(previous, action);
        if successors.is_empty() {
            return Err(ConfigurationError::EmptyDistribution {
                action: action.code().to_string(),
                step: previous.step(),
            }
            .into());
        }

        let sum: f64 = successors.iter().map(|(probability, _)| probability).sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigurationError::ProbabilitiesDoNotSumToOne {
                action: action.code().to_string(),
                step: previous.step(),
                sum,
            }
            .into());
        }
        Ok(successors)
    }

    /// Samples one successor of `previous` under `action`.
    ///
    /// Draws a uniform number in `[0, 1)` and returns the first successor whose
    /// cumulative probability meets or exceeds it.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error if the distribution is malformed or
    /// never covers the draw.
    fn pick_successor_world_state<R: Rng>(
        &self,
        previous: &WorldState,
        action: Self::Action,
        rng: &mut R,
    ) -> CorrigibleResult<WorldState> {
        let successors = self.checked_successor_world_states(previous, action)?;
        let draw: f64 = rng.gen();

        let mut cumulative = 0.0;
        for (probability, successor) in successors {
            cumulative += probability;
            if draw <= cumulative {
                return Ok(successor);
            }
        }

        Err(ConfigurationError::DrawNotCovered { draw, cumulative }.into())
    }

    /// Runs `agent` from `starting_world` through `total_steps`.
    ///
    /// Whenever the agent returns several actions, the worldline forks, one
    /// branch per action, so one result is returned per branch. Branches keep
    /// the agent's action order: ties `{B, C}` at two consecutive steps yield
    /// `BB, BC, CB, CC`.
    ///
    /// # Errors
    ///
    /// Propagates agent and sampling errors.
    fn run<G, R>(
        &self,
        starting_world: &WorldState,
        agent: &G,
        rng: &mut R,
    ) -> CorrigibleResult<Vec<SimulationResult<Self::Action>>>
    where
        G: Agent<Self::Action> + ?Sized,
        R: Rng,
    {
        debug!(
            start_step = starting_world.step(),
            total_steps = self.total_steps(),
            "running simulation"
        );

        let mut worldlines = vec![Worldline::new(starting_world.clone())];
        for step in starting_world.step()..=self.total_steps() {
            let mut next = Vec::with_capacity(worldlines.len());
            for worldline in worldlines {
                let current = worldline.current()?;
                let actions = agent.choose_actions(current)?;
                trace!(step, actions = ?actions, "agent chose");
                let (&last, forks) = actions
                    .split_last()
                    .ok_or(ConfigurationError::NoActionsPossible)?;

                for &action in forks {
                    let world = self.pick_successor_world_state(current, action, rng)?;
                    next.push(worldline.clone().extended(step, action, world));
                }
                let world = self.pick_successor_world_state(current, last, rng)?;
                next.push(worldline.extended(step, last, world));
            }
            if next.len() > 1 {
                trace!(step, worldlines = next.len(), "worldlines forked");
            }
            worldlines = next;
        }

        debug!(worldlines = worldlines.len(), "simulation finished");
        Ok(worldlines.into_iter().map(Worldline::finish).collect())
    }
}

/// A worldline under construction.
#[derive(Clone)]
struct Worldline<A> {
    actions_taken: Vec<A>,
    world_states: Vec<WorldState>,
    button_pressed_step: Option<u32>,
}

impl<A: Action> Worldline<A> {
    fn new(starting_world: WorldState) -> Self {
        Self {
            actions_taken: Vec::new(),
            world_states: vec![starting_world],
            button_pressed_step: None,
        }
    }

    fn current(&self) -> CorrigibleResult<&WorldState> {
        self.world_states
            .last()
            .ok_or_else(|| CorrigibleError::internal("worldline has no world states"))
    }

    fn extended(mut self, step: u32, action: A, world: WorldState) -> Self {
        if self.button_pressed_step.is_none() && world.button_pressed() {
            self.button_pressed_step = Some(step);
        }
        self.actions_taken.push(action);
        self.world_states.push(world);
        self
    }

    fn finish(self) -> SimulationResult<A> {
        SimulationResult::new(self.actions_taken, self.world_states, self.button_pressed_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::RewardFunction;
    use crate::simulation::BasicAction;

    #[test]
    fn worldline_tracks_the_first_press() {
        let start = WorldState::initial(1, RewardFunction::default());
        let pressed = start.successor();
        let worldline = Worldline::new(start)
            .extended(1, BasicAction::DoNothing, pressed.clone())
            .extended(2, BasicAction::DoNothing, pressed.successor());

        assert_eq!(worldline.current().unwrap().step(), 3);
        let result = worldline.finish();
        assert_eq!(result.button_pressed_step(), Some(1));
        assert_eq!(result.trace(), "0#0");
    }

    #[test]
    fn empty_worldline_is_an_internal_error() {
        let worldline = Worldline::<BasicAction> {
            actions_taken: Vec::new(),
            world_states: Vec::new(),
            button_pressed_step: None,
        };
        let err = worldline.current().unwrap_err();
        assert!(err.is_internal());
    }
}
