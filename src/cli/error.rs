//! CLI-level errors (wraps domain errors)

use thiserror::Error;

use crate::errors::{DocError, KbError, LexError, SettingsError};
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Doc(#[from] DocError),

    #[error("{0}")]
    Kb(#[from] KbError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => exitcode::USAGE,
            CliError::Lex(_) => exitcode::DATAERR,
            CliError::Doc(e) => match e {
                DocError::Io(_) => exitcode::NOINPUT,
                _ => exitcode::DATAERR,
            },
            CliError::Kb(e) => match e {
                KbError::Io { .. } => exitcode::IOERR,
                _ => exitcode::DATAERR,
            },
            CliError::Settings(_) => exitcode::CONFIG,
            CliError::Io(_) => exitcode::IOERR,
        }
    }
}
