//! Domain-level errors, one enum per concern

use std::path::PathBuf;
use thiserror::Error;

/// Errors from splitting a raw command line into words.
#[derive(Error, Debug)]
pub enum LexError {
    #[error("unterminated {kind} quote starting at byte {pos}")]
    UnterminatedQuote { kind: &'static str, pos: usize },

    #[error("trailing backslash at end of command line")]
    TrailingEscape,

    #[error("empty command line")]
    EmptyCommand,
}

/// Errors from parsing an annotation document.
#[derive(Error, Debug)]
pub enum DocError {
    #[error("failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("document has no command line")]
    MissingCommandLine,

    #[error("empty `#` heading on line {line}")]
    EmptyHeading { line: usize },

    #[error("caption text before any `#` heading on line {line}")]
    StrayText { line: usize },

    #[error("token `{token}` not found (again) in the command line")]
    UnknownToken { token: String },
}

/// Errors from loading or querying the knowledge base.
#[derive(Error, Debug)]
pub enum KbError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid entry {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("duplicate entry `{name}` in {path}")]
    DuplicateEntry { name: String, path: PathBuf },

    #[error("no entry for command `{0}`")]
    UnknownCommand(String),

    #[error("`{command}` has no subcommand `{subcommand}`")]
    UnknownSubcommand { command: String, subcommand: String },
}

/// Errors from loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config: {message}")]
    Config { message: String },
}

pub type LexResult<T> = Result<T, LexError>;
pub type DocResult<T> = Result<T, DocError>;
pub type KbResult<T> = Result<T, KbError>;
