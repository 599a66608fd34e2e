//! Crate-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Top-level error type: domain failures plus configuration loading.
#[derive(Error, Debug)]
pub enum CovenError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for crate-level operations.
pub type CovenResult<T> = Result<T, CovenError>;
