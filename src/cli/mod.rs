//! CLI module for venued
//!
//! Provides command-line interface for:
//! - serve: boot the admin HTTP server and block until shutdown
//! - check-config: validate the effective configuration and exit

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run, serve};
pub use errors::{CliError, CliResult};
