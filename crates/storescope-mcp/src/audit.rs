// crates/storescope-mcp/src/audit.rs
// ============================================================================
// Module: Gateway Audit Logging
// Description: Structured audit events for invocation handling.
// Purpose: Emit redacted audit logs without hard dependencies.
// Dependencies: storescope-core, serde, serde_json
// ============================================================================

//! ## Overview
//! One audit event is emitted per invocation, carrying the internal error
//! detail that masked callers never see. Events are JSON lines so deployments
//! can route them to their preferred logging pipeline without redesign.
//! Argument values and the API credential are never part of an event.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use storescope_core::InvocationResult;
use storescope_core::TransportKind;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Invocation audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct InvocationAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Caller-supplied request identifier when provided.
    pub request_id: Option<String>,
    /// Transport that delivered the invocation.
    pub transport: &'static str,
    /// Invoked tool name.
    pub tool: String,
    /// Outcome label (`ok` or `error`).
    pub outcome: &'static str,
    /// Error taxonomy label when the invocation failed.
    pub error_kind: Option<&'static str>,
    /// Internal diagnostic detail, withheld from masked callers.
    pub internal_detail: Option<String>,
    /// End-to-end dispatch latency in milliseconds.
    pub elapsed_ms: u128,
}

impl InvocationAuditEvent {
    /// Builds the event for one completed invocation.
    #[must_use]
    pub fn from_result(
        request_id: Option<String>,
        transport: TransportKind,
        result: &InvocationResult,
        elapsed_ms: u128,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        let envelope = result.outcome.as_ref().err();
        Self {
            event: "invocation",
            timestamp_ms,
            request_id,
            transport: transport.as_str(),
            tool: result.tool.clone(),
            outcome: if envelope.is_none() { "ok" } else { "error" },
            error_kind: envelope.map(|envelope| envelope.kind.as_str()),
            internal_detail: envelope.map(|envelope| envelope.internal_detail.clone()),
            elapsed_ms,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for invocation events.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &InvocationAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &InvocationAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &InvocationAuditEvent) {}
}

// ============================================================================
// SECTION: Tests
// ============================================================================
