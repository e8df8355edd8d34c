use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid reward: {message}")]
    InvalidReward { message: String },

    #[error("Arm '{arm_id}' is not part of experiment '{experiment_id}'")]
    UnknownArm {
        experiment_id: String,
        arm_id: String,
    },

    #[error("Empty arm set: {message}")]
    EmptyArmSet { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn duplicate_experiment(experiment_id: impl AsRef<str>) -> Self {
        Self::conflict(format!(
            "Experiment '{}' already exists",
            experiment_id.as_ref()
        ))
    }

    pub fn duplicate_arm(experiment_id: impl AsRef<str>, arm_id: impl AsRef<str>) -> Self {
        Self::conflict(format!(
            "Arm '{}' already exists in experiment '{}'",
            arm_id.as_ref(),
            experiment_id.as_ref()
        ))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invalid_reward(message: impl Into<String>) -> Self {
        Self::InvalidReward {
            message: message.into(),
        }
    }

    pub fn unknown_arm(experiment_id: impl Into<String>, arm_id: impl Into<String>) -> Self {
        Self::UnknownArm {
            experiment_id: experiment_id.into(),
            arm_id: arm_id.into(),
        }
    }

    pub fn empty_arm_set(message: impl Into<String>) -> Self {
        Self::EmptyArmSet {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Conflicts are the expected outcome of racing create-if-absent callers,
    /// not a failure of the losing caller's request.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
