//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add execution and configuration failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A spawned step exited non-zero; `code` is passed through unchanged.
    #[error("command exited with code {code}: {command}")]
    CommandFailed { command: String, code: i32 },

    #[error("cannot execute '{program}': {source}")]
    CommandUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
