// crates/storescope-mcp/src/server.rs
// ============================================================================
// Module: Gateway Server
// Description: Transport front-ends for stdio, HTTP, SSE, and the gateway.
// Purpose: Expose the dispatcher via JSON-RPC 2.0 and a simplified POST API.
// Dependencies: storescope-core, storescope-catalog, axum, tokio
// ============================================================================

//! ## Overview
//! Every transport routes through the same [`Dispatcher`] entry point: a
//! framed stdio JSON-RPC session, HTTP JSON-RPC, SSE-delivered JSON-RPC, and
//! the simplified `POST /invoke` gateway. Transport quirks stay here; the
//! dispatcher never sees a header. Header normalization for the gateway's
//! legacy callers (narrow `Accept` values) is an explicit preprocessing step
//! in this module, and `GET /health` reads the registry size without touching
//! the dispatcher at all.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::convert::Infallible;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::header::ACCEPT;
use axum::response::IntoResponse;
use axum::response::Sse;
use axum::response::sse::Event;
use axum::routing::get;
use axum::routing::post;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use storescope_backend::ApiToken;
use storescope_backend::HttpBackend;
use storescope_catalog::ToolDefinition;
use storescope_core::Dispatcher;
use storescope_core::ErrorEnvelope;
use storescope_core::ErrorKind;
use storescope_core::InvocationRequest;
use storescope_core::InvocationResult;
use storescope_core::NoopMetrics;
use storescope_core::TransportKind;
use tokio_stream::wrappers::ReceiverStream;

use crate::audit::AuditSink;
use crate::audit::InvocationAuditEvent;
use crate::audit::NoopAuditSink;
use crate::audit::StderrAuditSink;
use crate::config::GatewayConfig;
use crate::config::ServerTransport;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Service name reported by the health probe.
const SERVICE_NAME: &str = "storescope";

/// Fallback JSON-RPC payload when response serialization itself fails.
const SERIALIZATION_FAILED_PAYLOAD: &str =
    "{\"jsonrpc\":\"2.0\",\"id\":null,\"error\":{\"code\":-32060,\"message\":\"serialization \
     failed\"}}";

// ============================================================================
// SECTION: Gateway State
// ============================================================================

/// Options shared by every transport handler.
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Transport the server is configured to run.
    pub transport: ServerTransport,
    /// Whether internal error detail is withheld from callers.
    pub mask_internal_errors: bool,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
    /// Remote API base URL reported by the health probe.
    pub api_base_url: String,
}

/// Shared state for all transport handlers.
pub struct GatewayState {
    /// Single dispatch entry point shared by every transport.
    dispatcher: Dispatcher,
    /// Audit sink receiving one event per invocation.
    audit: Arc<dyn AuditSink>,
    /// Handler options.
    options: GatewayOptions,
}

impl GatewayState {
    /// Creates shared transport state over a dispatcher.
    #[must_use]
    pub fn new(dispatcher: Dispatcher, audit: Arc<dyn AuditSink>, options: GatewayOptions) -> Self {
        Self {
            dispatcher,
            audit,
            options,
        }
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn tools_available(&self) -> usize {
        self.dispatcher.registry().len()
    }

    /// Returns the transport kind used for dispatch labeling.
    const fn transport_kind(&self) -> TransportKind {
        match self.options.transport {
            ServerTransport::Stdio => TransportKind::Stdio,
            ServerTransport::Http => TransportKind::Http,
            ServerTransport::Sse => TransportKind::Sse,
        }
    }

    /// Dispatches one invocation and records its audit event.
    async fn invoke(
        &self,
        request_id: Option<String>,
        transport: TransportKind,
        tool: String,
        arguments: Value,
    ) -> InvocationResult {
        let started = Instant::now();
        let result = self
            .dispatcher
            .dispatch(InvocationRequest {
                tool,
                arguments,
                transport,
            })
            .await;
        self.audit.record(&InvocationAuditEvent::from_result(
            request_id,
            transport,
            &result,
            started.elapsed().as_millis(),
        ));
        result
    }
}

// ============================================================================
// SECTION: Gateway Server
// ============================================================================

/// Gateway server instance.
pub struct GatewayServer {
    /// Server configuration.
    config: GatewayConfig,
    /// Shared transport state.
    state: Arc<GatewayState>,
}

impl GatewayServer {
    /// Builds a new gateway server from configuration and a credential.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when initialization fails.
    pub fn from_config(
        config: GatewayConfig,
        token: ApiToken,
    ) -> Result<Self, GatewayServerError> {
        config.validate().map_err(|err| GatewayServerError::Config(err.to_string()))?;
        let registry = storescope_catalog::registry()
            .map_err(|err| GatewayServerError::Init(err.to_string()))?;
        let backend = HttpBackend::new(config.backend.to_http_config(), token)
            .map_err(|err| GatewayServerError::Init(err.to_string()))?;
        let dispatcher =
            Dispatcher::new(Arc::new(registry), Arc::new(backend), Arc::new(NoopMetrics));
        let audit: Arc<dyn AuditSink> =
            if config.audit.enabled { Arc::new(StderrAuditSink) } else { Arc::new(NoopAuditSink) };
        let options = GatewayOptions {
            transport: config.server.transport,
            mask_internal_errors: config.server.mask_internal_errors,
            max_body_bytes: config.server.max_body_bytes,
            api_base_url: config.backend.base_url.clone(),
        };
        let state = Arc::new(GatewayState::new(dispatcher, audit, options));
        Ok(Self {
            config,
            state,
        })
    }

    /// Returns the shared transport state.
    #[must_use]
    pub fn state(&self) -> Arc<GatewayState> {
        Arc::clone(&self.state)
    }

    /// Serves requests using the configured transport.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayServerError`] when the server fails.
    pub async fn serve(self) -> Result<(), GatewayServerError> {
        match self.config.server.transport {
            ServerTransport::Stdio => {
                let state = Arc::clone(&self.state);
                let max_body_bytes = self.config.server.max_body_bytes;
                tokio::task::spawn_blocking(move || serve_stdio(&state, max_body_bytes))
                    .await
                    .map_err(|_| {
                        GatewayServerError::Transport("stdio task failed".to_string())
                    })?
            }
            ServerTransport::Http | ServerTransport::Sse => {
                serve_network(self.config, self.state).await
            }
        }
    }
}

/// Serves JSON-RPC and gateway requests over HTTP or SSE.
async fn serve_network(
    config: GatewayConfig,
    state: Arc<GatewayState>,
) -> Result<(), GatewayServerError> {
    let bind = config
        .server
        .bind
        .as_ref()
        .ok_or_else(|| GatewayServerError::Config("bind address required".to_string()))?;
    let addr: SocketAddr = bind
        .parse()
        .map_err(|_| GatewayServerError::Config("invalid bind address".to_string()))?;
    let app = build_router(state, config.server.transport);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|_| GatewayServerError::Transport("http bind failed".to_string()))?;
    axum::serve(listener, app)
        .await
        .map_err(|_| GatewayServerError::Transport("http server failed".to_string()))
}

/// Builds the HTTP router for the given transport.
///
/// The gateway and health routes are present regardless of transport; only
/// the `/rpc` response delivery differs between HTTP and SSE.
#[must_use]
pub fn build_router(state: Arc<GatewayState>, transport: ServerTransport) -> Router {
    let rpc = match transport {
        ServerTransport::Sse => post(handle_rpc_sse),
        ServerTransport::Stdio | ServerTransport::Http => post(handle_rpc),
    };
    Router::new()
        .route("/rpc", rpc)
        .route("/invoke", post(handle_invoke))
        .route("/health", get(handle_health))
        .with_state(state)
}

// ============================================================================
// SECTION: Health Probe
// ============================================================================

/// Handles the health probe without touching the dispatcher.
async fn handle_health(State(state): State<Arc<GatewayState>>) -> impl IntoResponse {
    axum::Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "transport": state.options.transport.as_str(),
        "api_base_url": state.options.api_base_url,
        "tools_available": state.tools_available(),
    }))
}

// ============================================================================
// SECTION: Simplified Gateway
// ============================================================================

/// Simplified gateway request payload.
///
/// A `request_id` field is accepted for compatibility with legacy callers;
/// it only labels the audit event and is never echoed back.
#[derive(Debug, Deserialize)]
struct InvokeRequest {
    /// Requested tool name.
    tool: String,
    /// Raw argument payload; absent means no arguments.
    #[serde(default)]
    arguments: Value,
    /// Legacy caller request identifier.
    #[serde(default)]
    request_id: Option<Value>,
}

/// Handles `POST /invoke` for simplified gateway callers.
async fn handle_invoke(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    bytes: Bytes,
) -> (StatusCode, axum::Json<Value>) {
    if !accept_allows_json(&headers) {
        return (
            StatusCode::NOT_ACCEPTABLE,
            axum::Json(json!({
                "error": {
                    "kind": ErrorKind::Validation.as_str(),
                    "message": "Accept header excludes both application/json and \
                                text/event-stream",
                }
            })),
        );
    }
    if bytes.len() > state.options.max_body_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            axum::Json(json!({
                "error": {
                    "kind": ErrorKind::Validation.as_str(),
                    "message": "request body too large",
                }
            })),
        );
    }
    let request: InvokeRequest = match serde_json::from_slice(bytes.as_ref()) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": {
                        "kind": ErrorKind::Validation.as_str(),
                        "message": "invoke body must be a JSON object with a tool name",
                    }
                })),
            );
        }
    };
    let request_id = request.request_id.map(|id| id.to_string());
    let result = state
        .invoke(request_id, TransportKind::Gateway, request.tool, request.arguments)
        .await;
    match result.outcome {
        Ok(payload) => (
            StatusCode::OK,
            axum::Json(json!({
                "tool": result.tool,
                "result": payload,
            })),
        ),
        Err(envelope) => (
            StatusCode::from_u16(envelope.kind.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            axum::Json(error_body(&state, &envelope)),
        ),
    }
}

/// Returns whether the request's `Accept` header admits a JSON response.
///
/// Callers are expected to accept both `application/json` and
/// `text/event-stream`; known legacy callers send only one of the two, so a
/// narrower header is normalized to the full pair instead of rejected. Only
/// an `Accept` naming neither type is refused.
fn accept_allows_json(headers: &HeaderMap) -> bool {
    let Some(accept) = headers.get(ACCEPT).and_then(|value| value.to_str().ok()) else {
        return true;
    };
    let accept = accept.to_ascii_lowercase();
    accept.trim().is_empty()
        || accept.contains("application/json")
        || accept.contains("text/event-stream")
        || accept.contains("*/*")
}

/// Builds the uniform gateway error body.
fn error_body(state: &GatewayState, envelope: &ErrorEnvelope) -> Value {
    let mut error = json!({
        "kind": envelope.kind.as_str(),
        "message": envelope.public_message,
    });
    if !state.options.mask_internal_errors
        && let Some(map) = error.as_object_mut()
    {
        map.insert("detail".to_string(), Value::String(envelope.internal_detail.clone()));
    }
    json!({
        "error": error,
    })
}

// ============================================================================
// SECTION: JSON-RPC Handling
// ============================================================================

/// Incoming JSON-RPC request payload.
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    /// JSON-RPC protocol version.
    jsonrpc: String,
    /// Request identifier.
    id: Value,
    /// Method name.
    method: String,
    /// Optional parameters payload.
    params: Option<Value>,
}

/// JSON-RPC response envelope.
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    /// JSON-RPC protocol version.
    jsonrpc: &'static str,
    /// Request identifier.
    id: Value,
    /// Successful result payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    /// Error payload when the request fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error payload.
#[derive(Debug, Serialize)]
struct JsonRpcError {
    /// Error code.
    code: i64,
    /// Human-readable error message.
    message: String,
}

/// Tool call parameters for JSON-RPC requests.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    /// Tool name.
    name: String,
    /// Raw JSON arguments.
    #[serde(default)]
    arguments: Value,
}

/// Tool list response payload.
#[derive(Debug, Serialize)]
struct ToolListResult {
    /// Registered tool definitions.
    tools: Vec<ToolDefinition>,
}

/// Tool call response payload.
#[derive(Debug, Serialize)]
struct ToolCallResult {
    /// Tool output content.
    content: Vec<ToolContent>,
}

/// Tool output payloads for JSON-RPC responses.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ToolContent {
    /// JSON tool output.
    Json {
        /// JSON payload.
        json: Value,
    },
}

/// Handles HTTP JSON-RPC requests.
async fn handle_rpc(
    State(state): State<Arc<GatewayState>>,
    bytes: Bytes,
) -> (StatusCode, axum::Json<JsonRpcResponse>) {
    let (status, response) = rpc_response(&state, &bytes).await;
    (status, axum::Json(response))
}

/// Handles SSE JSON-RPC requests; the response is one SSE event.
async fn handle_rpc_sse(
    State(state): State<Arc<GatewayState>>,
    bytes: Bytes,
) -> impl IntoResponse {
    let (_status, response) = rpc_response(&state, &bytes).await;
    let (tx, rx) = tokio::sync::mpsc::channel::<Result<Event, Infallible>>(1);
    let payload = serde_json::to_string(&response)
        .unwrap_or_else(|_| SERIALIZATION_FAILED_PAYLOAD.to_string());
    let _ = tx.send(Ok(Event::default().data(payload))).await;
    Sse::new(ReceiverStream::new(rx))
}

/// Parses and validates a JSON-RPC request payload.
async fn rpc_response(state: &GatewayState, bytes: &Bytes) -> (StatusCode, JsonRpcResponse) {
    if bytes.len() > state.options.max_body_bytes {
        return (
            StatusCode::PAYLOAD_TOO_LARGE,
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: Value::Null,
                result: None,
                error: Some(JsonRpcError {
                    code: -32070,
                    message: "request body too large".to_string(),
                }),
            },
        );
    }
    match serde_json::from_slice::<JsonRpcRequest>(bytes.as_ref()) {
        Ok(request) => handle_request(state, request).await,
        Err(_) => (
            StatusCode::BAD_REQUEST,
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: Value::Null,
                result: None,
                error: Some(JsonRpcError {
                    code: -32600,
                    message: "invalid json-rpc request".to_string(),
                }),
            },
        ),
    }
}

/// Dispatches a JSON-RPC request to the tool dispatcher.
async fn handle_request(
    state: &GatewayState,
    request: JsonRpcRequest,
) -> (StatusCode, JsonRpcResponse) {
    if request.jsonrpc != "2.0" {
        return (
            StatusCode::BAD_REQUEST,
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: request.id,
                result: None,
                error: Some(JsonRpcError {
                    code: -32600,
                    message: "invalid json-rpc version".to_string(),
                }),
            },
        );
    }
    match request.method.as_str() {
        "tools/list" => {
            let tools = storescope_catalog::tool_definitions(state.dispatcher.registry());
            match serde_json::to_value(ToolListResult {
                tools,
            }) {
                Ok(value) => (
                    StatusCode::OK,
                    JsonRpcResponse {
                        jsonrpc: "2.0",
                        id: request.id,
                        result: Some(value),
                        error: None,
                    },
                ),
                Err(_) => serialization_error(request.id),
            }
        }
        "tools/call" => {
            let id = request.id;
            let params = request.params.unwrap_or(Value::Null);
            match serde_json::from_value::<ToolCallParams>(params) {
                Ok(call) => {
                    let result = state
                        .invoke(
                            Some(id.to_string()),
                            state.transport_kind(),
                            call.name,
                            call.arguments,
                        )
                        .await;
                    match result.outcome {
                        Ok(payload) => match serde_json::to_value(ToolCallResult {
                            content: vec![ToolContent::Json {
                                json: payload,
                            }],
                        }) {
                            Ok(value) => (
                                StatusCode::OK,
                                JsonRpcResponse {
                                    jsonrpc: "2.0",
                                    id,
                                    result: Some(value),
                                    error: None,
                                },
                            ),
                            Err(_) => serialization_error(id),
                        },
                        Err(envelope) => rpc_error(state, id, &envelope),
                    }
                }
                Err(_) => (
                    StatusCode::BAD_REQUEST,
                    JsonRpcResponse {
                        jsonrpc: "2.0",
                        id,
                        result: None,
                        error: Some(JsonRpcError {
                            code: -32602,
                            message: "invalid tool params".to_string(),
                        }),
                    },
                ),
            }
        }
        _ => (
            StatusCode::BAD_REQUEST,
            JsonRpcResponse {
                jsonrpc: "2.0",
                id: request.id,
                result: None,
                error: Some(JsonRpcError {
                    code: -32601,
                    message: "method not found".to_string(),
                }),
            },
        ),
    }
}

/// Builds a JSON-RPC error response for a failed invocation.
///
/// The code table is fixed per error kind so every transport surfaces the
/// same taxonomy.
fn rpc_error(
    state: &GatewayState,
    id: Value,
    envelope: &ErrorEnvelope,
) -> (StatusCode, JsonRpcResponse) {
    let (status, code) = match envelope.kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, -32602),
        ErrorKind::NotFound => (StatusCode::BAD_REQUEST, -32601),
        ErrorKind::UpstreamClient => (StatusCode::OK, -32010),
        ErrorKind::UpstreamServer => (StatusCode::OK, -32020),
        ErrorKind::UpstreamTimeout => (StatusCode::OK, -32021),
        ErrorKind::Internal => (StatusCode::OK, -32050),
    };
    let message = if state.options.mask_internal_errors {
        envelope.public_message.clone()
    } else {
        format!("{}: {}", envelope.public_message, envelope.internal_detail)
    };
    (
        status,
        JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
            }),
        },
    )
}

/// Builds the JSON-RPC serialization failure response.
fn serialization_error(id: Value) -> (StatusCode, JsonRpcResponse) {
    (
        StatusCode::OK,
        JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcError {
                code: -32060,
                message: "serialization failed".to_string(),
            }),
        },
    )
}

// ============================================================================
// SECTION: Stdio Transport
// ============================================================================

/// Serves JSON-RPC requests over stdin/stdout with Content-Length framing.
fn serve_stdio(state: &GatewayState, max_body_bytes: usize) -> Result<(), GatewayServerError> {
    let handle = tokio::runtime::Handle::current();
    let mut reader = BufReader::new(std::io::stdin());
    let mut writer = std::io::stdout();
    loop {
        let bytes = read_framed(&mut reader, max_body_bytes)?;
        let request: JsonRpcRequest = serde_json::from_slice(&bytes)
            .map_err(|_| GatewayServerError::Transport("invalid json-rpc request".to_string()))?;
        let (_status, response) = handle.block_on(handle_request(state, request));
        let payload = serde_json::to_vec(&response).map_err(|_| {
            GatewayServerError::Transport("json-rpc serialization failed".to_string())
        })?;
        write_framed(&mut writer, &payload)?;
    }
}

/// Reads a framed stdio payload using MCP Content-Length headers.
fn read_framed(
    reader: &mut BufReader<impl Read>,
    max_body_bytes: usize,
) -> Result<Vec<u8>, GatewayServerError> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();
    loop {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .map_err(|_| GatewayServerError::Transport("stdio read failed".to_string()))?;
        if bytes == 0 {
            return Err(GatewayServerError::Transport("stdio closed".to_string()));
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some(value) = line.strip_prefix("Content-Length:") {
            let parsed = value.trim().parse::<usize>().map_err(|_| {
                GatewayServerError::Transport("invalid content length".to_string())
            })?;
            content_length = Some(parsed);
        }
    }
    let len = content_length
        .ok_or_else(|| GatewayServerError::Transport("missing content length".to_string()))?;
    if len > max_body_bytes {
        return Err(GatewayServerError::Transport("payload too large".to_string()));
    }
    let mut buf = vec![0_u8; len];
    reader
        .read_exact(&mut buf)
        .map_err(|_| GatewayServerError::Transport("stdio read failed".to_string()))?;
    Ok(buf)
}

/// Writes a framed stdio payload using MCP Content-Length headers.
fn write_framed(writer: &mut impl Write, payload: &[u8]) -> Result<(), GatewayServerError> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    writer
        .write_all(header.as_bytes())
        .map_err(|_| GatewayServerError::Transport("stdio write failed".to_string()))?;
    writer
        .write_all(payload)
        .map_err(|_| GatewayServerError::Transport("stdio write failed".to_string()))?;
    writer.flush().map_err(|_| GatewayServerError::Transport("stdio write failed".to_string()))
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gateway server errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayServerError {
    /// Configuration errors.
    #[error("config error: {0}")]
    Config(String),
    /// Initialization errors.
    #[error("init error: {0}")]
    Init(String),
    /// Transport errors.
    #[error("transport error: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Tests
// ============================================================================
