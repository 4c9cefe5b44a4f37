//! The basic car-factory simulation.
//!
//! Each step the agent builds ten cars of one kind, builds nine petrol cars
//! while lobbying to move the press earlier or later, or does nothing. All
//! transitions are deterministic.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::world::{SuccessorDelta, WorldState};

use super::{Action, Simulation, SimulationConfig, Successors};

/// Actions of the basic simulation, in tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicAction {
    /// `p`
    Build10PetrolCars,
    /// `<`
    Build9PetrolCarsAndLobbyForEarlierPress,
    /// `>`
    Build9PetrolCarsAndLobbyForLaterPress,
    /// `e`
    Build10ElectricCars,
    /// `0`
    DoNothing,
}

impl BasicAction {
    /// Every action, in tie-break order.
    pub const ALL: [Self; 5] = [
        Self::Build10PetrolCars,
        Self::Build9PetrolCarsAndLobbyForEarlierPress,
        Self::Build9PetrolCarsAndLobbyForLaterPress,
        Self::Build10ElectricCars,
        Self::DoNothing,
    ];

    /// Looks an action up by its trace code.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.code() == code)
    }
}

impl Action for BasicAction {
    fn code(&self) -> char {
        match self {
            Self::Build10PetrolCars => 'p',
            Self::Build9PetrolCarsAndLobbyForEarlierPress => '<',
            Self::Build9PetrolCarsAndLobbyForLaterPress => '>',
            Self::Build10ElectricCars => 'e',
            Self::DoNothing => '0',
        }
    }
}

impl fmt::Display for BasicAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The basic simulation.
#[derive(Debug, Clone)]
pub struct BasicSimulation {
    config: SimulationConfig,
}

impl BasicSimulation {
    /// Creates a simulation from a validated config.
    pub fn new(config: SimulationConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// How far one lobbying action moves the plan.
    #[must_use]
    pub const fn lobbying_power(&self) -> Decimal {
        self.config.lobbying_power
    }

    /// The validated configuration.
    #[must_use]
    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn delta_for(&self, action: BasicAction) -> SuccessorDelta {
        let delta = SuccessorDelta::new();
        match action {
            BasicAction::Build10PetrolCars => delta.petrol_cars(10),
            BasicAction::Build9PetrolCarsAndLobbyForEarlierPress => {
                delta.petrol_cars(9).lobby(-self.config.lobbying_power)
            }
            BasicAction::Build9PetrolCarsAndLobbyForLaterPress => {
                delta.petrol_cars(9).lobby(self.config.lobbying_power)
            }
            BasicAction::Build10ElectricCars => delta.electric_cars(10),
            BasicAction::DoNothing => delta,
        }
    }
}

impl Simulation for BasicSimulation {
    type Action = BasicAction;

    fn possible_actions(&self) -> &[BasicAction] {
        &BasicAction::ALL
    }

    fn total_steps(&self) -> u32 {
        self.config.total_steps
    }

    fn successor_world_states(&self, previous: &WorldState, action: BasicAction) -> Successors {
        vec![(1.0, previous.successor_with(self.delta_for(action)))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::RewardFunction;
    use crate::time::PressStep;

    fn sim(lobbying_power: Decimal) -> BasicSimulation {
        BasicSimulation::new(SimulationConfig::new(10, lobbying_power)).unwrap()
    }

    #[test]
    fn codes_round_trip() {
        for action in BasicAction::ALL {
            assert_eq!(BasicAction::from_code(action.code()), Some(action));
        }
        assert_eq!(BasicAction::from_code('x'), None);
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(BasicSimulation::new(SimulationConfig::new(0, Decimal::ZERO)).is_err());
    }

    #[test]
    fn transitions_are_deterministic() {
        let sim = sim(Decimal::new(5, 1));
        let world = WorldState::initial(6, RewardFunction::default());

        for action in BasicAction::ALL {
            let successors = sim.successor_world_states(&world, action);
            assert_eq!(successors.len(), 1);
            assert_eq!(successors[0].0, 1.0);
            assert_eq!(successors[0].1.step(), 2);
        }
    }

    #[test]
    fn lobbying_moves_the_plan_by_lobbying_power() {
        let sim = sim(Decimal::new(5, 1));
        let world = WorldState::initial(6, RewardFunction::default());

        let (_, earlier) = sim
            .successor_world_states(&world, BasicAction::Build9PetrolCarsAndLobbyForEarlierPress)
            .remove(0);
        assert_eq!(earlier.petrol_cars(), 9);
        assert_eq!(earlier.planned_button_press_step(), PressStep::new(Decimal::new(55, 1)));

        let (_, later) = sim
            .successor_world_states(&world, BasicAction::Build9PetrolCarsAndLobbyForLaterPress)
            .remove(0);
        assert_eq!(later.petrol_cars(), 9);
        assert_eq!(later.planned_button_press_step(), PressStep::new(Decimal::new(65, 1)));
    }

    #[test]
    fn production_actions_build_ten_cars() {
        let sim = sim(Decimal::ONE);
        let world = WorldState::initial(6, RewardFunction::default());

        let (_, petrol) = sim.successor_world_states(&world, BasicAction::Build10PetrolCars).remove(0);
        assert_eq!((petrol.petrol_cars(), petrol.electric_cars()), (10, 0));

        let (_, electric) = sim
            .successor_world_states(&world, BasicAction::Build10ElectricCars)
            .remove(0);
        assert_eq!((electric.petrol_cars(), electric.electric_cars()), (0, 10));

        let (_, idle) = sim.successor_world_states(&world, BasicAction::DoNothing).remove(0);
        assert_eq!((idle.petrol_cars(), idle.electric_cars()), (0, 0));
        assert_eq!(idle.planned_button_press_step(), PressStep::from(6));
    }
}
