//! CLI argument definitions using clap
//!
//! Commands:
//! - venued serve [--bind <addr>] [--port <port>]
//! - venued check-config [--bind <addr>] [--port <port>]

use clap::{Parser, Subcommand};

/// venued - A strict, concurrency-safe admin service core for venue operations
#[derive(Parser, Debug)]
#[command(name = "venued")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the admin HTTP server
    Serve {
        /// Bind address for the HTTP listener
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port for the HTTP listener
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },

    /// Validate the effective configuration and exit
    CheckConfig {
        /// Bind address for the HTTP listener
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,

        /// Port for the HTTP listener
        #[arg(long, default_value_t = 8787)]
        port: u16,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
