//! CLI-specific error types
//!
//! All CLI errors are fatal: the process prints the error and exits
//! non-zero.

use std::io;
use std::net::AddrParseError;

use thiserror::Error;

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration is unusable
    #[error("configuration error: {0}")]
    Config(String),

    /// Listener or runtime I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<AddrParseError> for CliError {
    fn from(e: AddrParseError) -> Self {
        Self::Config(format!("invalid bind address: {e}"))
    }
}
