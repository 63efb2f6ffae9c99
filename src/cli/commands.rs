//! CLI command implementations
//!
//! The entrypoint stays synchronous; `serve` owns the tokio runtime and
//! blocks on the server until it exits.

use crate::http_server::{HttpServer, HttpServerConfig};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { host, port } => serve(&host, port),
    }
}

/// Boot the HTTP server and serve until shutdown
pub fn serve(host: &str, port: u16) -> CliResult<()> {
    let config = HttpServerConfig::with_addr(host, port);
    let server = HttpServer::with_config(config);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(server.start())?;

    Ok(())
}
