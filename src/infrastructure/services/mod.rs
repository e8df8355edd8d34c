//! Engine services

mod decision_service;

pub use decision_service::{CreateExperimentRequest, Decision, DecisionEngine, RewardReceipt};
