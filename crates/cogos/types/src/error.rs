//! Error types shared across the hook core.
//!
//! `HookError` is the single recoverable error channel for hooks and for
//! the synthesis collaborator. Everything else here is a setup-time error.

use std::time::Duration;

use thiserror::Error;

/// Recoverable failure reported by a hook or by the synthesis client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HookError {
    /// The hook ran and could not produce a result.
    #[error("{reason}")]
    ExecutionFailed { reason: String },

    /// The request did not carry what the hook needs.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A collaborator the hook depends on is missing or unreachable.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The invocation exceeded its deadline.
    #[error("timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    /// The synthesis collaborator failed.
    #[error("synthesis failed: {0}")]
    Synthesis(String),
}

impl HookError {
    /// Shorthand for [`HookError::ExecutionFailed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            reason: reason.into(),
        }
    }
}

/// Errors raised when constructing core values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("field '{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Errors raised by execution context lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The stored config value cannot be read as the requested type.
    #[error("config key '{key}' is not of type {expected}")]
    ConfigTypeMismatch { key: String, expected: &'static str },
}

/// Result type for value construction.
pub type TypesResult<T> = Result<T, ValidationError>;
