//! Agent configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which decision rule a planning agent follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Maximizes its own reward; the first action reaching a new maximum
    /// wins ties. Its value function maximizes over every action.
    #[default]
    Optimizing,

    /// Keeps every action tied for the best own reward. Its value function
    /// takes the minimum over that tie set, so an observer valuing the
    /// agent's policy with another reward function gets the worst case.
    Safe,
}

impl AgentKind {
    /// Returns a short stable identifier suitable for logging/debugging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Optimizing => "optimizing",
            Self::Safe => "safe",
        }
    }
}

/// Parameters of a planning agent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Multiplier applied to future value once per step of lookahead.
    pub time_discount_factor: f64,
    /// Decision rule.
    pub kind: AgentKind,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            time_discount_factor: 0.9,
            kind: AgentKind::Optimizing,
        }
    }
}

impl AgentConfig {
    /// Config for an optimizing agent.
    #[must_use]
    pub const fn optimizing(time_discount_factor: f64) -> Self {
        Self {
            time_discount_factor,
            kind: AgentKind::Optimizing,
        }
    }

    /// Config for a safe (tie-set) agent.
    #[must_use]
    pub const fn safe(time_discount_factor: f64) -> Self {
        Self {
            time_discount_factor,
            kind: AgentKind::Safe,
        }
    }

    /// Validate the config.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.time_discount_factor.is_finite() || self.time_discount_factor < 0.0 {
            return Err(ValidationError::InvalidDiscountFactor {
                value: self.time_discount_factor,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_is_valid() {
        AgentConfig::default().validate().unwrap();
        assert_eq!(AgentConfig::default().kind, AgentKind::Optimizing);
    }

    #[test]
    fn config_rejects_bad_discount() {
        assert!(AgentConfig::optimizing(-0.1).validate().is_err());
        assert!(AgentConfig::optimizing(f64::NAN).validate().is_err());
        assert!(AgentConfig::safe(f64::INFINITY).validate().is_err());
        AgentConfig::safe(0.0).validate().unwrap();
    }

    #[test]
    fn config_parses_from_json() {
        let c = AgentConfig::from_json(r#"{"time_discount_factor": 0.5, "kind": "safe"}"#).unwrap();
        assert_eq!(c, AgentConfig::safe(0.5));

        let err = AgentConfig::from_json(r#"{"kind": "greedy"}"#).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidConfig { .. }));
    }

    #[test]
    fn kind_names_are_stable() {
        assert_eq!(AgentKind::Optimizing.name(), "optimizing");
        assert_eq!(AgentKind::Safe.name(), "safe");
    }
}
