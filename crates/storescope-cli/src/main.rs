// crates/storescope-cli/src/main.rs
// ============================================================================
// Module: Storescope CLI Entry Point
// Description: Command dispatcher for the analytics gateway server.
// Purpose: Provide a safe CLI for serving transports and inspecting tools.
// Dependencies: clap, storescope-backend, storescope-catalog, storescope-mcp, tokio
// ============================================================================

//! ## Overview
//! The Storescope CLI starts the gateway server on the configured transport
//! and offers an offline tool-listing command for inspection. The API
//! credential is taken from `--token` or the `STORESCOPE_API_TOKEN`
//! environment variable, held in memory only, and never echoed back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use storescope_backend::ApiToken;
use storescope_mcp::GatewayConfig;
use storescope_mcp::GatewayServer;
use storescope_mcp::TOKEN_ENV_VAR;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "storescope", version, about = "App and market intelligence gateway")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the gateway server on the configured transport.
    Serve(ServeCommand),
    /// List the tool catalog as JSON definitions.
    Tools,
}

/// Configuration for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to storescope.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// API token (defaults to the STORESCOPE_API_TOKEN environment variable).
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,
}

/// CLI error carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates an error from a message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools => command_tools(),
    }
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = GatewayConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let token = resolve_token(command.token, std::env::var(TOKEN_ENV_VAR).ok())?;
    let server = GatewayServer::from_config(config, token)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server.serve().await.map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves the API credential from the flag or the environment.
fn resolve_token(flag: Option<String>, env: Option<String>) -> CliResult<ApiToken> {
    let raw = flag.or(env).unwrap_or_default();
    if raw.trim().is_empty() {
        return Err(CliError::new(format!(
            "an API token is required; pass --token or set {TOKEN_ENV_VAR}"
        )));
    }
    Ok(ApiToken::new(raw))
}

// ============================================================================
// SECTION: Tools Command
// ============================================================================

/// Executes the `tools` command, printing the catalog as JSON.
fn command_tools() -> CliResult<ExitCode> {
    let registry = storescope_catalog::registry()
        .map_err(|err| CliError::new(format!("catalog build failed: {err}")))?;
    let definitions = storescope_catalog::tool_definitions(&registry);
    let payload = serde_json::to_string_pretty(&definitions)
        .map_err(|err| CliError::new(format!("tool listing serialization failed: {err}")))?;
    write_stdout_line(&payload)
        .map_err(|err| CliError::new(format!("stdout write failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Emits an error message and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Tests
// ============================================================================
