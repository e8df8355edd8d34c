//! Domain layer - core bandit model and selection logic

pub mod error;
pub mod experiment;
pub mod strategy;

pub use error::DomainError;
pub use experiment::{
    validate_reward, ArmId, ArmStateStore, ArmStatistics, Experiment, ExperimentId,
    ExperimentStore, ExperimentValidationError,
};
pub use strategy::{
    ArmStatsSnapshot, BanditRng, EpsilonGreedyParams, SeededRng, SelectionStrategy,
    StrategyConfig, ThompsonParams, Ucb1Params,
};
