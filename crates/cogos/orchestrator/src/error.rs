//! Orchestrator error types

use thiserror::Error;

/// Setup errors. Request handling itself never fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    /// Configuration rejected at construction time
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type for orchestrator setup
pub type Result<T> = std::result::Result<T, OrchestratorError>;
