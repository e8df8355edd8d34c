//! Experiment validation utilities

use thiserror::Error;

/// Maximum length for experiment IDs
pub const MAX_EXPERIMENT_ID_LENGTH: usize = 120;

/// Maximum length for arm IDs
pub const MAX_ARM_ID_LENGTH: usize = 120;

/// Minimum number of unique arms an experiment needs at creation
pub const MIN_ARMS_AT_CREATION: usize = 2;

/// Validation errors for experiments and arms
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentValidationError {
    #[error("Experiment ID cannot be empty")]
    EmptyId,

    #[error("Experiment ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Arm ID cannot be empty")]
    EmptyArmId,

    #[error("Arm ID exceeds maximum length of {0} characters")]
    ArmIdTooLong(usize),

    #[error("Experiment must have at least {0} unique arms")]
    InsufficientArms(usize),

    #[error("Duplicate arm ID: '{0}'")]
    DuplicateArmId(String),
}

/// Validate an experiment ID (after whitespace trimming)
pub fn validate_experiment_id(id: &str) -> Result<(), ExperimentValidationError> {
    if id.is_empty() {
        return Err(ExperimentValidationError::EmptyId);
    }

    if id.chars().count() > MAX_EXPERIMENT_ID_LENGTH {
        return Err(ExperimentValidationError::IdTooLong(
            MAX_EXPERIMENT_ID_LENGTH,
        ));
    }

    Ok(())
}

/// Validate an arm ID (after whitespace trimming)
pub fn validate_arm_id(id: &str) -> Result<(), ExperimentValidationError> {
    if id.is_empty() {
        return Err(ExperimentValidationError::EmptyArmId);
    }

    if id.chars().count() > MAX_ARM_ID_LENGTH {
        return Err(ExperimentValidationError::ArmIdTooLong(MAX_ARM_ID_LENGTH));
    }

    Ok(())
}
