//! Error types for NCI Core

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
