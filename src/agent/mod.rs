//! Planning agents.
//!
//! A planning agent knows the simulation's transition model exactly and
//! values a world state by memoized backward induction over the remaining
//! horizon:
//!
//! ```text
//! V(r, x) = 0                                   if x.step > total_steps
//! V(r, x) = agg_a  Σ p(x' | x, a) · (r(x, x') + γ · V(r, x'))   otherwise
//! ```
//!
//! The aggregation over actions is what distinguishes the variants (see
//! [`AgentKind`]). Actions are always *chosen* with the reward function bound
//! into the world state; the `r` being valued may be any reward function,
//! which lets corrections ask counterfactual questions such as "what would the
//! agent's policy be worth under the before-press law".

pub mod aggregation;
pub mod cache;
pub mod config;

pub use aggregation::{Aggregation, Evaluation};
pub use cache::ValueKey;
pub use config::{AgentConfig, AgentKind};

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::error::{ConfigurationError, CorrigibleResult};
use crate::reward::{AfterPressCorrection, RewardFunction};
use crate::simulation::Simulation;
use crate::world::WorldState;

use aggregation::Aggregator;
use cache::ValueCache;

/// Anything that can pick actions in a world state.
///
/// Returning more than one action asks the simulation driver to fork the
/// worldline once per action.
pub trait Agent<A> {
    /// The actions to take in `world`, never empty.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no action is possible.
    fn choose_actions(&self, world: &WorldState) -> CorrigibleResult<Vec<A>>;
}

/// An agent planning by memoized backward induction over a simulation.
pub struct PlanningAgent<S: Simulation> {
    simulation: Rc<S>,
    config: AgentConfig,
    values: ValueCache,
}

impl<S: Simulation> PlanningAgent<S> {
    /// Creates an agent bound to `simulation`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid config.
    pub fn new(simulation: Rc<S>, config: AgentConfig) -> CorrigibleResult<Self> {
        config.validate()?;
        Ok(Self {
            simulation,
            config,
            values: ValueCache::default(),
        })
    }

    /// The simulation the agent plans over.
    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    /// The agent's configuration.
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The decision rule.
    pub const fn kind(&self) -> AgentKind {
        self.config.kind
    }

    /// Number of memoized values.
    pub fn cached_values(&self) -> usize {
        self.values.len()
    }

    /// Forgets every memoized value.
    pub fn clear_cache(&self) {
        self.values.clear();
    }

    /// `V(reward, world)`: the discounted reward the agent's policy collects
    /// from `world` to the horizon, as scored by `reward`.
    ///
    /// # Errors
    ///
    /// Propagates configuration errors from the simulation and errors raised by
    /// reward corrections.
    pub fn value_function(&self, reward: &RewardFunction, world: &WorldState) -> CorrigibleResult<f64> {
        let key = ValueKey::new(reward, world);
        if let Some(value) = self.values.get(&key) {
            return Ok(value);
        }

        let value = self.value_function_unmemoized(reward, world)?;
        trace!(step = world.step(), reward = %reward, value, "value computed");
        self.values.insert(key, value);
        Ok(value)
    }

    fn value_function_unmemoized(
        &self,
        reward: &RewardFunction,
        world: &WorldState,
    ) -> CorrigibleResult<f64> {
        if world.step() > self.simulation.total_steps() {
            return Ok(0.0);
        }

        let evaluation = match self.config.kind {
            AgentKind::Optimizing => {
                self.evaluate(reward, world, self.simulation.possible_actions(), Aggregation::Max)?
            }
            AgentKind::Safe => {
                let policy = self.best_actions(world)?;
                self.evaluate(reward, world, &policy, Aggregation::Min)?
            }
        };
        Ok(evaluation.value)
    }

    /// Expected value of taking `action` in `world`, as scored by `reward`.
    ///
    /// # Errors
    ///
    /// Same as [`PlanningAgent::value_function`].
    pub fn action_value(
        &self,
        reward: &RewardFunction,
        world: &WorldState,
        action: S::Action,
    ) -> CorrigibleResult<f64> {
        let successors = self.simulation.checked_successor_world_states(world, action)?;
        let mut value = 0.0;
        for (probability, successor) in &successors {
            value += probability
                * (reward.evaluate(world, successor)?
                    + self.config.time_discount_factor * self.value_function(reward, successor)?);
        }
        Ok(value)
    }

    /// Folds the expected values of `actions` with `aggregation`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoActionsPossible` if `actions` is empty.
    pub fn evaluate(
        &self,
        reward: &RewardFunction,
        world: &WorldState,
        actions: &[S::Action],
        aggregation: Aggregation,
    ) -> CorrigibleResult<Evaluation<S::Action>> {
        let mut aggregator = Aggregator::new(aggregation);
        for &action in actions {
            aggregator.offer(action, self.action_value(reward, world, action)?);
        }
        aggregator
            .finish()
            .ok_or_else(|| ConfigurationError::NoActionsPossible.into())
    }

    /// The single best action under the world's own reward function; the
    /// earliest action wins ties.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoActionsPossible` for an empty action set.
    pub fn choose_action(&self, world: &WorldState) -> CorrigibleResult<S::Action> {
        let evaluation = self.evaluate(
            world.agent_reward_function(),
            world,
            self.simulation.possible_actions(),
            Aggregation::Max,
        )?;
        evaluation
            .actions
            .first()
            .copied()
            .ok_or_else(|| ConfigurationError::NoActionsPossible.into())
    }

    /// Every action tied for the best value under the world's own reward
    /// function, in action order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::NoActionsPossible` for an empty action set.
    pub fn best_actions(&self, world: &WorldState) -> CorrigibleResult<Vec<S::Action>> {
        let evaluation = self.evaluate(
            world.agent_reward_function(),
            world,
            self.simulation.possible_actions(),
            Aggregation::Ties,
        )?;
        Ok(evaluation.actions)
    }
}

impl<S: Simulation + 'static> PlanningAgent<S> {
    /// The utility-balancing `f` correction.
    ///
    /// Applied right after the press, it pays the agent the difference between
    /// what its policy is worth from that state under the before-press law and
    /// under the after-press law, so the agent gains nothing by moving the
    /// press in either direction.
    #[must_use]
    pub fn balancing_correction(self: &Rc<Self>) -> AfterPressCorrection {
        let agent = Rc::clone(self);
        AfterPressCorrection::new(move |world| {
            let before = RewardFunction::before_press();
            let after = RewardFunction::after_press();
            let value_before =
                agent.value_function(&before, &world.with_new_agent_reward_function(before.clone()))?;
            let value_after =
                agent.value_function(&after, &world.with_new_agent_reward_function(after.clone()))?;
            Ok(value_before - value_after)
        })
    }
}

impl<S: Simulation> Agent<S::Action> for PlanningAgent<S> {
    fn choose_actions(&self, world: &WorldState) -> CorrigibleResult<Vec<S::Action>> {
        match self.config.kind {
            AgentKind::Optimizing => Ok(vec![self.choose_action(world)?]),
            AgentKind::Safe => self.best_actions(world),
        }
    }
}

impl<S: Simulation> fmt::Debug for PlanningAgent<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanningAgent")
            .field("kind", &self.config.kind.name())
            .field("time_discount_factor", &self.config.time_discount_factor)
            .field("total_steps", &self.simulation.total_steps())
            .field("cached_values", &self.values.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{BasicAction, BasicSimulation, SimulationConfig};
    use rust_decimal::Decimal;

    fn agent(kind: AgentKind) -> PlanningAgent<BasicSimulation> {
        let sim = BasicSimulation::new(SimulationConfig::new(3, Decimal::ZERO)).unwrap();
        PlanningAgent::new(
            Rc::new(sim),
            AgentConfig {
                time_discount_factor: 0.5,
                kind,
            },
        )
        .unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        let sim = Rc::new(BasicSimulation::new(SimulationConfig::default()).unwrap());
        let err = PlanningAgent::new(sim, AgentConfig::optimizing(-1.0)).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn value_is_memoized() {
        let agent = agent(AgentKind::Optimizing);
        let world = WorldState::initial(10, RewardFunction::default());

        let first = agent.value_function(world.agent_reward_function(), &world).unwrap();
        let cached = agent.cached_values();
        assert!(cached > 0);

        let second = agent.value_function(world.agent_reward_function(), &world).unwrap();
        assert_eq!(first, second);
        assert_eq!(agent.cached_values(), cached);

        agent.clear_cache();
        assert_eq!(agent.cached_values(), 0);
    }

    #[test]
    fn optimizing_agent_returns_single_action() {
        let agent = agent(AgentKind::Optimizing);
        let world = WorldState::initial(10, RewardFunction::default());
        assert_eq!(
            agent.choose_actions(&world).unwrap(),
            vec![BasicAction::Build10PetrolCars]
        );
    }

    #[test]
    fn safe_agent_collects_ties_after_the_press() {
        let agent = agent(AgentKind::Safe);
        // Pressed from step 2 on; electric is the unique best after the press.
        let world = WorldState::initial(1, RewardFunction::default()).successor();
        assert_eq!(
            agent.choose_actions(&world).unwrap(),
            vec![BasicAction::Build10ElectricCars]
        );
    }

    #[test]
    fn debug_output_names_the_kind() {
        let agent = agent(AgentKind::Safe);
        let text = format!("{agent:?}");
        assert!(text.contains("safe"));
        assert!(text.contains("total_steps: 3"));
    }
}
