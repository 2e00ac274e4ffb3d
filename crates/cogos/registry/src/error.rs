//! Registry error types

use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No hook is registered under this id
    #[error("hook not found: {0}")]
    HookNotFound(String),
}

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;
