//! Strategy configuration
//!
//! The active strategy is a tagged sum type carrying its own parameters, so
//! an experiment can never pair a strategy with another strategy's params.
//! Configuration strings map to variants here, at creation or hot-swap time,
//! never at selection time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::domain::DomainError;

use super::epsilon_greedy::EpsilonGreedyStrategy;
use super::selection::SelectionStrategy;
use super::thompson::ThompsonSamplingStrategy;
use super::ucb1::Ucb1Strategy;

/// Default exploration rate for Epsilon-Greedy
pub const DEFAULT_EPSILON: f64 = 0.1;

/// Default exploration weight (`c`) for UCB1; the textbook formula uses 1.0
pub const DEFAULT_EXPLORATION_WEIGHT: f64 = 1.0;

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_exploration_weight() -> f64 {
    DEFAULT_EXPLORATION_WEIGHT
}

// ============================================================================
// Per-strategy parameters
// ============================================================================

/// Thompson Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThompsonParams {
    /// Optional seed for reproducible sampling
    #[serde(default)]
    pub seed: Option<i64>,
}

/// UCB1 parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ucb1Params {
    /// Optional seed; UCB1 is otherwise deterministic, the seed only affects
    /// tie-breaking
    #[serde(default)]
    pub seed: Option<i64>,
    /// Multiplier on the exploration bonus term
    #[serde(default = "default_exploration_weight")]
    pub exploration_weight: f64,
}

impl Default for Ucb1Params {
    fn default() -> Self {
        Self {
            seed: None,
            exploration_weight: DEFAULT_EXPLORATION_WEIGHT,
        }
    }
}

/// Epsilon-Greedy parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedyParams {
    /// Probability of exploring instead of exploiting, in `[0, 1]`
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Optional seed for reproducible selection
    #[serde(default)]
    pub seed: Option<i64>,
}

impl Default for EpsilonGreedyParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            seed: None,
        }
    }
}

// ============================================================================
// StrategyConfig
// ============================================================================

/// The active strategy of an experiment, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyConfig {
    Thompson(ThompsonParams),
    Ucb1(Ucb1Params),
    EpsilonGreedy(EpsilonGreedyParams),
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self::Thompson(ThompsonParams::default())
    }
}

impl StrategyConfig {
    /// Canonical strategy names accepted by [`StrategyConfig::from_name_and_params`]
    pub const SUPPORTED_STRATEGIES: [&'static str; 3] = ["thompson", "ucb1", "epsilon_greedy"];

    /// Normalize a configured strategy name: case-insensitive, `-` treated
    /// as `_`, with the historical aliases still accepted.
    pub fn normalize_name(name: &str) -> String {
        let normalized = name.trim().to_lowercase().replace('-', "_");

        match normalized.as_str() {
            "ts" | "thompson_sampling" => "thompson".to_string(),
            "epsilon" | "eps_greedy" => "epsilon_greedy".to_string(),
            "ucb" => "ucb1".to_string(),
            _ => normalized,
        }
    }

    /// Map a strategy name and a JSON parameter object to a validated config.
    ///
    /// `params` may be `null` (all defaults). Unknown names and out-of-range
    /// parameters fail with a validation error.
    pub fn from_name_and_params(name: &str, params: &Value) -> Result<Self, DomainError> {
        let params = match params {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other.clone(),
        };

        let normalized = Self::normalize_name(name);
        let parse_error = |e: serde_json::Error| {
            DomainError::validation(format!("Invalid parameters for strategy '{normalized}': {e}"))
        };

        let config = match normalized.as_str() {
            "thompson" => Self::Thompson(serde_json::from_value(params).map_err(parse_error)?),
            "ucb1" => Self::Ucb1(serde_json::from_value(params).map_err(parse_error)?),
            "epsilon_greedy" => {
                Self::EpsilonGreedy(serde_json::from_value(params).map_err(parse_error)?)
            }
            _ => {
                return Err(DomainError::validation(format!(
                    "Unsupported strategy '{name}'. Valid values: THOMPSON, EPSILON_GREEDY, UCB1."
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Map a strategy name with default parameters
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        Self::from_name_and_params(name, &Value::Null)
    }

    /// Canonical name of the configured strategy
    pub fn name(&self) -> &'static str {
        match self {
            Self::Thompson(_) => "thompson",
            Self::Ucb1(_) => "ucb1",
            Self::EpsilonGreedy(_) => "epsilon_greedy",
        }
    }

    /// The configured seed, if any
    pub fn seed(&self) -> Option<i64> {
        match self {
            Self::Thompson(params) => params.seed,
            Self::Ucb1(params) => params.seed,
            Self::EpsilonGreedy(params) => params.seed,
        }
    }

    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            Self::Thompson(_) => Ok(()),
            Self::Ucb1(params) => {
                if !params.exploration_weight.is_finite() || params.exploration_weight <= 0.0 {
                    return Err(DomainError::validation(format!(
                        "exploration_weight must be a positive finite number, got {}",
                        params.exploration_weight
                    )));
                }
                Ok(())
            }
            Self::EpsilonGreedy(params) => {
                if !params.epsilon.is_finite() || !(0.0..=1.0).contains(&params.epsilon) {
                    return Err(DomainError::validation(format!(
                        "epsilon must be in [0, 1], got {}",
                        params.epsilon
                    )));
                }
                Ok(())
            }
        }
    }

    /// Construct the selection algorithm for this configuration
    pub fn build(&self) -> Box<dyn SelectionStrategy> {
        match self {
            Self::Thompson(_) => Box::new(ThompsonSamplingStrategy::new()),
            Self::Ucb1(params) => Box::new(Ucb1Strategy::new(*params)),
            Self::EpsilonGreedy(params) => Box::new(EpsilonGreedyStrategy::new(*params)),
        }
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
