//! CLI-level errors (wraps application errors)

use clap::error::ErrorKind;
use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Parse(#[from] clap::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// A failing external command's own code is passed through unchanged.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Parse(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exitcode::OK,
                _ => exitcode::USAGE,
            },
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) => exitcode::USAGE,
                ApplicationError::CommandFailed { code, .. } => *code,
                ApplicationError::CommandUnavailable { source, .. } => {
                    if source.kind() == std::io::ErrorKind::NotFound {
                        exitcode::NOT_FOUND
                    } else {
                        exitcode::CANNOT_EXECUTE
                    }
                }
                ApplicationError::Config { .. } => exitcode::CONFIG,
            },
        }
    }

    /// Whether this is bad user input, for which usage help is shown.
    pub fn is_usage(&self) -> bool {
        match self {
            CliError::Parse(e) => !matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ),
            CliError::Application(e) => matches!(e, ApplicationError::Domain(_)),
        }
    }
}
