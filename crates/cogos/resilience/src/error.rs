//! Error types for the resilience crate.

use thiserror::Error;

/// Errors raised while setting up the executor.
///
/// Execution itself never fails: every hook outcome becomes a result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResilienceError {
    /// Configuration rejected at construction time.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type for resilience operations.
pub type ResilienceResult<T> = Result<T, ResilienceError>;
