// crates/storescope-backend/src/lib.rs
// ============================================================================
// Module: Storescope Backend
// Description: Outbound HTTP client for the remote analytics API.
// Purpose: Issue credentialed, bounded, retried requests for the dispatcher.
// Dependencies: reqwest, tokio, url, storescope-core
// ============================================================================

//! ## Overview
//! This crate provides the production [`storescope_core::Backend`]
//! implementation. It injects the API credential, applies the per-call
//! timeout, and retries transient failures with capped exponential backoff.
//! Every exposed operation is a read, so retries are always safe. The
//! credential never appears in logs, `Debug` output, or error payloads.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;

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

pub use http::ApiToken;
pub use http::DEFAULT_API_BASE_URL;
pub use http::HttpBackend;
pub use http::HttpBackendConfig;
pub use http::HttpBackendError;
