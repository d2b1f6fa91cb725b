// crates/storescope-core/src/telemetry.rs
// ============================================================================
// Module: Gateway Telemetry
// Description: Observability hooks for invocation dispatch.
// Purpose: Provide metric events and latency buckets without hard deps.
// Dependencies: storescope-core::dispatch, storescope-core::error
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for invocation counters and
//! latency histograms. It is intentionally dependency-light so deployments
//! can plug in Prometheus or OpenTelemetry without redesign. Events never
//! carry argument values or credentials; labels are bounded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::dispatch::TransportKind;
use crate::error::ErrorKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default latency buckets in milliseconds for invocation histograms.
pub const GATEWAY_LATENCY_BUCKETS_MS: &[u64] =
    &[1, 2, 5, 10, 25, 50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 30_000];

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// Invocation outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// The invocation completed with a canonical payload.
    Ok,
    /// The invocation failed with an error envelope.
    Error,
}

impl InvocationOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

/// Invocation metric event payload.
///
/// # Invariants
/// - `error_kind` is `None` exactly when `outcome` is [`InvocationOutcome::Ok`].
#[derive(Debug, Clone)]
pub struct InvocationMetricEvent {
    /// Invoked tool name.
    pub tool: String,
    /// Transport that delivered the invocation.
    pub transport: TransportKind,
    /// Invocation outcome.
    pub outcome: InvocationOutcome,
    /// Error taxonomy kind when the invocation failed.
    pub error_kind: Option<ErrorKind>,
    /// End-to-end dispatch latency.
    pub elapsed: Duration,
}

// ============================================================================
// SECTION: Metrics Interface
// ============================================================================

/// Metrics sink for invocation events.
pub trait GatewayMetrics: Send + Sync {
    /// Records one invocation event.
    fn record(&self, event: &InvocationMetricEvent);
}

/// Metrics sink that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl GatewayMetrics for NoopMetrics {
    fn record(&self, _event: &InvocationMetricEvent) {}
}
