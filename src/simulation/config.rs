//! Simulation configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Parameters fixing a simulation's horizon and action strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Last step at which the agent acts (steps are 1-indexed).
    pub total_steps: u32,
    /// How far one lobbying action moves the planned press step.
    pub lobbying_power: Decimal,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            total_steps: 25,
            lobbying_power: Decimal::ZERO,
        }
    }
}

impl SimulationConfig {
    /// Config with the given horizon and lobbying power.
    #[must_use]
    pub const fn new(total_steps: u32, lobbying_power: Decimal) -> Self {
        Self {
            total_steps,
            lobbying_power,
        }
    }

    /// Validate the config.
    ///
    /// This must be called before constructing a simulation from it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_steps == 0 {
            return Err(ValidationError::InvalidTotalSteps {
                value: self.total_steps,
            });
        }
        if self.lobbying_power < Decimal::ZERO {
            return Err(ValidationError::InvalidLobbyingPower {
                value: self.lobbying_power.to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ValidationError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}
