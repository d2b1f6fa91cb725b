// crates/storescope-mcp/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared fixtures for transport integration tests.
// Purpose: Provide a spy backend, a small registry, and server spawning.
// Dependencies: storescope-core, storescope-mcp, axum, tokio
// ============================================================================

//! ## Overview
//! Shared fixtures for driving the transport handlers over a real local
//! listener: a counting spy backend with scripted replies, a compact tool
//! registry covering the remote, parameterized, and reference cases, and a
//! helper that serves a router on an ephemeral port.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use axum::Router;
use serde_json::Value;
use serde_json::json;
use storescope_core::Backend;
use storescope_core::BackendError;
use storescope_core::CanonicalQuery;
use storescope_core::Dispatcher;
use storescope_core::NoopMetrics;
use storescope_core::OutputHint;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::RawResponse;
use storescope_core::ToolDescriptor;
use storescope_core::ToolRegistry;
use storescope_mcp::GatewayOptions;
use storescope_mcp::GatewayState;
use storescope_mcp::NoopAuditSink;
use storescope_mcp::ServerTransport;

// ============================================================================
// SECTION: Spy Backend
// ============================================================================

/// Scripted backend reply for the spy.
#[derive(Debug, Clone)]
pub enum SpyReply {
    /// Respond with a 200 and the given body.
    Body(Value),
    /// Respond with a terminal status error.
    Status(u16),
    /// Respond with an exhausted-retries timeout.
    Timeout,
}

/// Backend spy counting outbound calls.
pub struct SpyBackend {
    /// Number of `send` invocations observed.
    calls: AtomicUsize,
    /// Scripted reply returned on every call.
    reply: SpyReply,
}

impl SpyBackend {
    /// Creates a spy returning the given reply.
    #[must_use]
    pub fn new(reply: SpyReply) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply,
        })
    }

    /// Returns the observed call count.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Backend for SpyBackend {
    async fn send(&self, _query: &CanonicalQuery) -> Result<RawResponse, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            SpyReply::Body(body) => Ok(RawResponse {
                status: 200,
                body: body.clone(),
            }),
            SpyReply::Status(status) => Err(BackendError::Status {
                status: *status,
                body: None,
            }),
            SpyReply::Timeout => Err(BackendError::Timeout),
        }
    }
}

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Builds a compact registry covering remote, parameterized, and reference
/// tools.
#[must_use]
pub fn sample_registry() -> ToolRegistry {
    let lookup_codes = ToolDescriptor::remote(
        "lookup_codes",
        "List remote lookup codes.",
        "/v1/lookup_codes",
        OutputHint::ListOfObjects,
    );
    let sales_estimates = ToolDescriptor::remote(
        "sales_estimates",
        "Fetch sales estimates.",
        "/v1/{os}/sales_report_estimates",
        OutputHint::ListOfObjects,
    )
    .with_param(
        ParamSpec::required("os", ParamKind::Enum)
            .with_allowed(&["ios", "android", "unified"])
            .bound_to_path(),
    )
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList).with_max_items(100))
    .with_param(ParamSpec::required("start_date", ParamKind::Date));
    let chart_types = ToolDescriptor::reference(
        "chart_types",
        "List supported ranking chart identifiers.",
        json!({"chart_types": {"topfreeapplications": "Top Free Apps"}}),
    );
    ToolRegistry::build(vec![lookup_codes, sales_estimates, chart_types])
        .unwrap_or_else(|err| panic!("sample registry must build: {err}"))
}

/// Builds gateway state over the sample registry and the given spy.
#[must_use]
pub fn gateway_state(
    backend: Arc<SpyBackend>,
    transport: ServerTransport,
    mask_internal_errors: bool,
) -> Arc<GatewayState> {
    let dispatcher =
        Dispatcher::new(Arc::new(sample_registry()), backend, Arc::new(NoopMetrics));
    Arc::new(GatewayState::new(
        dispatcher,
        Arc::new(NoopAuditSink),
        GatewayOptions {
            transport,
            mask_internal_errors,
            max_body_bytes: 1024 * 1024,
            api_base_url: "https://analytics.example".to_string(),
        },
    ))
}

/// Serves a router on an ephemeral local port and returns its base URL.
pub async fn spawn_router(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap_or_else(|err| panic!("listener bind failed: {err}"));
    let addr = listener.local_addr().unwrap_or_else(|err| panic!("local addr failed: {err}"));
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{addr}")
}
