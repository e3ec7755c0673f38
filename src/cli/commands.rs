//! CLI command implementations

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::rest_api::AdminServer;
use crate::service::AdminService;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments and dispatch to the requested command.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    init_tracing();

    match cli.command {
        Command::Serve { bind, port } => serve(ServerConfig {
            bind_address: bind,
            port,
        }),
        Command::CheckConfig { bind, port } => check_config(&ServerConfig {
            bind_address: bind,
            port,
        }),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Boot the admin server and block until shutdown.
pub fn serve(config: ServerConfig) -> CliResult<()> {
    let addr: SocketAddr = config.bind_addr().parse()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let server = AdminServer::new(AdminService::new());
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(%addr, "admin server listening");
        axum::serve(listener, server.router()).await?;
        Ok(())
    })
}

/// Validate the effective configuration and exit.
pub fn check_config(config: &ServerConfig) -> CliResult<()> {
    let addr: SocketAddr = config.bind_addr().parse()?;
    println!("configuration ok: {addr}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_config_accepts_defaults() {
        assert!(check_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_check_config_rejects_bad_address() {
        let config = ServerConfig {
            bind_address: "not-an-address".to_string(),
            port: 8787,
        };
        assert!(check_config(&config).is_err());
    }
}
