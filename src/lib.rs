//! # Corrigible - Decision-Theoretic Simulation of a Stop-Button Agent
//!
//! A car factory is run by a planning agent. At some planned step a button is
//! pressed that switches the reward law from favouring petrol cars to
//! penalising them. Left alone, an optimizing agent lobbies to move the press
//! later; correction terms on the reward function can make it indifferent to
//! the press instead.
//!
//! ## Core Concepts
//!
//! - **WorldState**: Immutable snapshot of one step, including the planned
//!   press step and the reward function governing the agent
//! - **RewardFunction**: Scores a transition; press-aware, with optional
//!   `f` (after-press) and `g` (before-press) correction terms
//! - **Simulation**: Action alphabet, horizon and stochastic transitions
//! - **PlanningAgent**: Memoized backward induction over a simulation
//! - **SimulationResult**: One recorded worldline, renderable as a trace
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use corrigible::{
//!     AgentConfig, BasicSimulation, PlanningAgent, RewardFunction, Simulation,
//!     SimulationConfig, WorldState,
//! };
//! use rust_decimal::Decimal;
//!
//! let sim = Rc::new(BasicSimulation::new(SimulationConfig::new(25, Decimal::new(5, 1)))?);
//! let agent = Rc::new(PlanningAgent::new(Rc::clone(&sim), AgentConfig::optimizing(0.9))?);
//!
//! let reward = RewardFunction::with_after_press_correction(agent.balancing_correction());
//! let world = WorldState::initial(6, reward);
//!
//! let results = sim.run(&world, agent.as_ref(), &mut rand::thread_rng())?;
//! assert_eq!(results[0].trace(), "pppppp#eeeeeeeeeeeeeeeeeee");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod error;
pub mod reward;
pub mod simulation;
pub mod time;
pub mod world;

// Re-export primary types at crate root for convenience
pub use agent::{
    Agent, AgentConfig, AgentKind, Aggregation, Evaluation, PlanningAgent, ValueKey,
};
pub use error::{ConfigurationError, CorrigibleError, CorrigibleResult, ValidationError};
pub use reward::{
    AfterPressCorrection, BeforePressCorrection, CorrectionId, RewardFunction, RewardFunctionId,
    RewardLaw,
};
pub use simulation::{
    Action, BasicAction, BasicSimulation, Simulation, SimulationConfig, SimulationResult,
    Successors, PRESS_MARKER, PROBABILITY_TOLERANCE,
};
pub use time::PressStep;
pub use world::{SuccessorDelta, WorldKey, WorldState};
