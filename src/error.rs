//! Error types for corrigible.
//!
//! All errors are strongly typed using thiserror. None of them is retryable:
//! the model is a closed world, so any error means the simulation or agent was
//! set up wrong and the computation should stop.

use thiserror::Error;

/// Validation errors raised while constructing simulations, agents and worlds.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Total steps must be at least 1, got {value}")]
    InvalidTotalSteps {
        value: u32,
    },

    #[error("Time discount factor {value} must be finite and non-negative")]
    InvalidDiscountFactor {
        value: f64,
    },

    #[error("Lobbying power {value} must be non-negative")]
    InvalidLobbyingPower {
        value: String,
    },

    #[error("Planned button press step {value} is not a finite number")]
    InvalidPressStep {
        value: f64,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Configuration mistakes detected while the model is being evaluated.
///
/// These can only be caused by a simulation whose transition model is
/// malformed, never by the agent's choices.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Successor probabilities for action '{action}' at step {step} summed to {sum} instead of 1")]
    ProbabilitiesDoNotSumToOne {
        action: String,
        step: u32,
        sum: f64,
    },

    #[error("No successor world states for action '{action}' at step {step}")]
    EmptyDistribution {
        action: String,
        step: u32,
    },

    #[error("No actions were possible in this simulation")]
    NoActionsPossible,

    #[error("Random draw {draw} not covered: probabilities summed to {cumulative}")]
    DrawNotCovered {
        draw: f64,
        cumulative: f64,
    },
}

/// Top-level error type for corrigible.
#[derive(Debug, Error)]
pub enum CorrigibleError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl CorrigibleError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for corrigible operations.
pub type CorrigibleResult<T> = Result<T, CorrigibleError>;
