// crates/storescope-mcp/src/lib.rs
// ============================================================================
// Module: Storescope MCP
// Description: Transport front-ends and configuration for the gateway.
// Purpose: Expose the dispatcher over stdio, HTTP, SSE, and the POST gateway.
// Dependencies: storescope-core, storescope-catalog, storescope-backend, axum, tokio
// ============================================================================

//! ## Overview
//! This crate wires the catalog, dispatcher, and backend client into the
//! transport surfaces callers actually use: a framed stdio JSON-RPC session,
//! HTTP JSON-RPC, SSE-delivered JSON-RPC, the simplified `POST /invoke`
//! gateway, and the `GET /health` probe. Configuration is TOML plus
//! environment overrides with fail-closed validation; audit events carry the
//! internal error detail masked callers never see.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod config;
pub mod server;

#[cfg(test)]
mod tests {
    //! Test-only lint relaxations for panic-based assertions and debug output.
    #![allow(
        clippy::panic,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        clippy::dbg_macro,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        reason = "Test-only output and panic-based assertions are permitted."
    )]
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::InvocationAuditEvent;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use config::BASE_URL_ENV_VAR;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::GatewayConfig;
pub use config::ServerTransport;
pub use config::TOKEN_ENV_VAR;
pub use server::GatewayOptions;
pub use server::GatewayServer;
pub use server::GatewayServerError;
pub use server::GatewayState;
pub use server::build_router;
