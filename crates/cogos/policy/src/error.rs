//! Policy error types

use thiserror::Error;

/// Errors a policy gate may raise while evaluating.
///
/// These never leave [`crate::PolicyEngine`]; it turns them into denials.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// Evaluation could not complete
    #[error("policy evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Required context data is missing
    #[error("missing context: {0}")]
    MissingContext(String),
}

/// Result type for policy operations
pub type Result<T> = std::result::Result<T, PolicyError>;
