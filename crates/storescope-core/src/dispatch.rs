// crates/storescope-core/src/dispatch.rs
// ============================================================================
// Module: Invocation Dispatcher
// Description: Single entry point orchestrating one tool invocation.
// Purpose: Route lookup, validation, backend calls, and normalization.
// Dependencies: storescope-core::{registry, validate, normalize, error}
// ============================================================================

//! ## Overview
//! The dispatcher is the only entry point used by every transport front-end.
//! One invocation progresses Received → Validating → Invoking → Normalizing
//! → Completed, with Failed reachable from every stage; no stage is ever
//! revisited. An unknown tool short-circuits before validation, a validation
//! failure never reaches the backend, and only successful backend responses
//! reach normalization. Local reference tools skip the Invoking stage and
//! serve their dataset through the same normalization path.
//!
//! ## Invariants
//! - No outbound request is issued before validation fully succeeds.
//! - A success payload and an error envelope are mutually exclusive.
//! - The registry and backend are shared read-only; concurrent invocations
//!   never observe each other.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Map;
use serde_json::Value;

use crate::descriptor::ToolEndpoint;
use crate::error::BackendError;
use crate::error::DispatchError;
use crate::error::ErrorEnvelope;
use crate::normalize::normalize;
use crate::registry::ToolRegistry;
use crate::telemetry::GatewayMetrics;
use crate::telemetry::InvocationMetricEvent;
use crate::telemetry::InvocationOutcome;
use crate::validate::CanonicalQuery;
use crate::validate::ValidationError;
use crate::validate::validate;

// ============================================================================
// SECTION: Backend Contract
// ============================================================================

/// Raw backend response for a successful request.
///
/// # Invariants
/// - Producers only return this for 2xx responses; terminal statuses are
///   reported as [`BackendError::Status`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code of the successful response.
    pub status: u16,
    /// Decoded JSON body, untouched.
    pub body: Value,
}

/// Outbound client contract for remote analytics requests.
///
/// The production implementation injects the credential, applies the
/// per-call timeout, and retries transient failures; tests substitute spies.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Sends one canonical query to the remote API.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on terminal statuses, exhausted retries, or
    /// undecodable bodies.
    async fn send(&self, query: &CanonicalQuery) -> Result<RawResponse, BackendError>;
}

// ============================================================================
// SECTION: Invocation Types
// ============================================================================

/// Transport front-end that delivered an invocation.
///
/// # Invariants
/// - Variants are stable for telemetry labeling; the dispatcher itself never
///   branches on the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// Stdio JSON-RPC session.
    Stdio,
    /// HTTP JSON-RPC endpoint.
    Http,
    /// HTTP JSON-RPC endpoint with SSE responses.
    Sse,
    /// Simplified HTTP POST gateway.
    Gateway,
}

impl TransportKind {
    /// Returns a stable label for the transport.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdio => "stdio",
            Self::Http => "http",
            Self::Sse => "sse",
            Self::Gateway => "gateway",
        }
    }
}

/// One tool invocation as received from a transport.
///
/// # Invariants
/// - Owned exclusively by the dispatcher for the duration of one invocation
///   and discarded afterwards.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    /// Requested tool name.
    pub tool: String,
    /// Raw argument payload; must be a JSON object or null.
    pub arguments: Value,
    /// Transport that delivered the request.
    pub transport: TransportKind,
}

/// Outcome of one invocation.
///
/// # Invariants
/// - `outcome` is either a canonical envelope or an error envelope, never
///   both; not retained after the response is sent.
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Invoked tool name.
    pub tool: String,
    /// Canonical payload on success, error envelope on failure.
    pub outcome: Result<Value, ErrorEnvelope>,
}

// ============================================================================
// SECTION: Dispatcher
// ============================================================================

/// Orchestrates registry lookup, validation, backend calls, and
/// normalization for every transport.
#[derive(Clone)]
pub struct Dispatcher {
    /// Immutable tool registry shared across invocations.
    registry: Arc<ToolRegistry>,
    /// Outbound backend client.
    backend: Arc<dyn Backend>,
    /// Metrics sink for invocation events.
    metrics: Arc<dyn GatewayMetrics>,
}

impl Dispatcher {
    /// Creates a dispatcher over a registry and backend client.
    #[must_use]
    pub fn new(
        registry: Arc<ToolRegistry>,
        backend: Arc<dyn Backend>,
        metrics: Arc<dyn GatewayMetrics>,
    ) -> Self {
        Self {
            registry,
            backend,
            metrics,
        }
    }

    /// Returns the registry backing this dispatcher.
    #[must_use]
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatches one invocation end to end.
    ///
    /// Never returns a transport-level error: every failure is mapped into
    /// an [`ErrorEnvelope`] so all transports share one error shape.
    pub async fn dispatch(&self, request: InvocationRequest) -> InvocationResult {
        let started = Instant::now();
        let outcome = self.run(&request).await.map_err(|err| ErrorEnvelope::from_error(&err));
        self.metrics.record(&InvocationMetricEvent {
            tool: request.tool.clone(),
            transport: request.transport,
            outcome: if outcome.is_ok() {
                InvocationOutcome::Ok
            } else {
                InvocationOutcome::Error
            },
            error_kind: outcome.as_ref().err().map(|envelope| envelope.kind),
            elapsed: started.elapsed(),
        });
        InvocationResult {
            tool: request.tool,
            outcome,
        }
    }

    /// Runs the invocation stages, short-circuiting on the first failure.
    async fn run(&self, request: &InvocationRequest) -> Result<Value, DispatchError> {
        let descriptor = self
            .registry
            .lookup(&request.tool)
            .ok_or_else(|| DispatchError::NotFound(request.tool.clone()))?;
        let args = argument_map(&request.arguments)?;
        let query = validate(descriptor, &args)?;
        let body = match &descriptor.endpoint {
            ToolEndpoint::Reference {
                dataset,
                select_by,
            } => reference_body(dataset, select_by.as_deref(), &query),
            ToolEndpoint::Remote {
                ..
            } => self.backend.send(&query).await?.body,
        };
        Ok(normalize(body, descriptor.output))
    }
}

/// Resolves a local reference dataset, selecting one entry when keyed.
///
/// A selector value with no matching dataset entry degrades to null, which
/// the normalizer turns into the empty canonical envelope.
fn reference_body(dataset: &Value, select_by: Option<&str>, query: &CanonicalQuery) -> Value {
    match select_by {
        Some(param) => query
            .params
            .get(param)
            .and_then(|value| dataset.get(value))
            .cloned()
            .unwrap_or(Value::Null),
        None => dataset.clone(),
    }
}

/// Extracts the argument object from a raw payload.
///
/// Null is treated as an empty argument set so tools with no required
/// parameters can be invoked without an `arguments` field.
fn argument_map(arguments: &Value) -> Result<Map<String, Value>, ValidationError> {
    match arguments {
        Value::Null => Ok(Map::new()),
        Value::Object(map) => Ok(map.clone()),
        _ => Err(ValidationError::ArgumentsNotObject),
    }
}
