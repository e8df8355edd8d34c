//! Experiment domain entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::validation::{
    validate_arm_id, validate_experiment_id, ExperimentValidationError, MIN_ARMS_AT_CREATION,
};
use crate::domain::strategy::StrategyConfig;

// ============================================================================
// ExperimentId
// ============================================================================

/// Unique identifier for an experiment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExperimentId(String);

impl ExperimentId {
    /// Create a new experiment ID with validation.
    ///
    /// Surrounding whitespace is trimmed before validation, matching the
    /// normalization the request layer applied in front of the original
    /// engine.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ExperimentValidationError> {
        let id = id.as_ref().trim();
        validate_experiment_id(id)?;
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExperimentId {
    type Error = ExperimentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExperimentId> for String {
    fn from(id: ExperimentId) -> Self {
        id.0
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ExperimentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// ArmId
// ============================================================================

/// Unique identifier for an arm within an experiment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArmId(String);

impl ArmId {
    /// Create a new arm ID with validation (surrounding whitespace trimmed)
    pub fn new(id: impl AsRef<str>) -> Result<Self, ExperimentValidationError> {
        let id = id.as_ref().trim();
        validate_arm_id(id)?;
        Ok(Self(id.to_string()))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArmId {
    type Error = ExperimentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArmId> for String {
    fn from(id: ArmId) -> Self {
        id.0
    }
}

impl fmt::Display for ArmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ArmId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Experiment
// ============================================================================

/// A bandit experiment: an ordered set of arms bound to one active strategy.
///
/// Arms are kept in insertion order and are never removed, only appended.
/// Per-arm statistics live in the arm state store, keyed by
/// `(experiment_id, arm_id)` — the experiment itself carries no counters, so
/// replacing the strategy or appending arms cannot disturb accumulated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    id: ExperimentId,
    arms: Vec<ArmId>,
    strategy: StrategyConfig,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Experiment {
    /// Create a new experiment with at least two unique arms
    pub fn new(
        id: ExperimentId,
        arms: Vec<ArmId>,
        strategy: StrategyConfig,
    ) -> Result<Self, ExperimentValidationError> {
        let mut seen = HashSet::new();

        for arm in &arms {
            if !seen.insert(arm.clone()) {
                return Err(ExperimentValidationError::DuplicateArmId(
                    arm.as_str().to_string(),
                ));
            }
        }

        if arms.len() < MIN_ARMS_AT_CREATION {
            return Err(ExperimentValidationError::InsufficientArms(
                MIN_ARMS_AT_CREATION,
            ));
        }

        let now = Utc::now();

        Ok(Self {
            id,
            arms,
            strategy,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    /// Get the experiment ID
    pub fn id(&self) -> &ExperimentId {
        &self.id
    }

    /// Get the arms in insertion order
    pub fn arms(&self) -> &[ArmId] {
        &self.arms
    }

    /// Get the active strategy configuration
    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    /// Get when the experiment was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Get when the experiment was last updated
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check whether the given arm belongs to this experiment
    pub fn contains_arm(&self, arm: &ArmId) -> bool {
        self.arms.iter().any(|a| a == arm)
    }

    // Mutators

    /// Append new arms, preserving insertion order.
    ///
    /// Rejects arms that are already present (or repeated within the new
    /// batch) without modifying the experiment.
    pub fn append_arms(&mut self, new_arms: &[ArmId]) -> Result<(), ExperimentValidationError> {
        let mut seen: HashSet<&ArmId> = self.arms.iter().collect();

        for arm in new_arms {
            if !seen.insert(arm) {
                return Err(ExperimentValidationError::DuplicateArmId(
                    arm.as_str().to_string(),
                ));
            }
        }

        self.arms.extend(new_arms.iter().cloned());
        self.touch();
        Ok(())
    }

    /// Replace the active strategy in place (hot-swap)
    pub fn set_strategy(&mut self, strategy: StrategyConfig) {
        self.strategy = strategy;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
