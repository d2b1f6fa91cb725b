// crates/storescope-mcp/tests/gateway.rs
// ============================================================================
// Module: Transport Integration Tests
// Description: End-to-end scenarios over the HTTP router.
// Purpose: Prove every transport surfaces one contract and one error shape.
// Dependencies: storescope-mcp, storescope-core, axum, reqwest, tokio
// ============================================================================

//! ## Overview
//! These tests serve the real router on a local port and drive it with an
//! HTTP client: the simplified gateway scenarios (canonical envelope,
//! validation short-circuit, upstream error mapping), header normalization,
//! the health probe, JSON-RPC listing and calling, SSE delivery, and error
//! masking.

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

mod common;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde_json::Value;
use serde_json::json;
use storescope_mcp::ServerTransport;
use storescope_mcp::build_router;

use crate::common::SpyBackend;
use crate::common::SpyReply;
use crate::common::gateway_state;
use crate::common::spawn_router;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Spawns an HTTP-transport gateway over the given spy backend.
async fn spawn_http_gateway(backend: Arc<SpyBackend>) -> String {
    let state = gateway_state(backend, ServerTransport::Http, true);
    spawn_router(build_router(state, ServerTransport::Http)).await
}

/// Posts a gateway invoke body and returns the status and JSON response.
async fn post_invoke(base: &str, body: Value) -> (u16, Value) {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/invoke"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json::<Value>().await.unwrap())
}

/// Posts a JSON-RPC body and returns the status and JSON response.
async fn post_rpc(base: &str, body: Value) -> (u16, Value) {
    let client = reqwest::Client::new();
    let response = client.post(format!("{base}/rpc")).json(&body).send().await.unwrap();
    let status = response.status().as_u16();
    (status, response.json::<Value>().await.unwrap())
}

// ============================================================================
// SECTION: Simplified Gateway
// ============================================================================

#[tokio::test]
async fn invoke_wraps_bare_lists_in_the_canonical_envelope() {
    let items = json!([
        {"code": "a"}, {"code": "b"}, {"code": "c"}, {"code": "d"}, {"code": "e"}
    ]);
    let backend = SpyBackend::new(SpyReply::Body(items.clone()));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) =
        post_invoke(&base, json!({"tool": "lookup_codes", "arguments": {}})).await;
    assert_eq!(status, 200);
    assert_eq!(body["tool"], json!("lookup_codes"));
    assert_eq!(body["result"]["items"], items);
    assert_eq!(body["result"]["total_count"], json!(5));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn invoke_missing_required_parameter_never_calls_the_backend() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) = post_invoke(
        &base,
        json!({
            "tool": "sales_estimates",
            "arguments": {"os": "ios", "app_ids": "284882215"},
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["kind"], json!("ValidationError"));
    assert!(body["error"]["message"].as_str().unwrap().contains("start_date"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn invoke_unknown_tool_is_not_found() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) = post_invoke(&base, json!({"tool": "no_such_tool"})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"]["kind"], json!("NotFound"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn invoke_maps_upstream_unauthorized_to_a_client_error() {
    let backend = SpyBackend::new(SpyReply::Status(401));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) =
        post_invoke(&base, json!({"tool": "lookup_codes", "arguments": {}})).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["kind"], json!("UpstreamClientError"));
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn invoke_maps_exhausted_timeouts_to_504() {
    let backend = SpyBackend::new(SpyReply::Timeout);
    let base = spawn_http_gateway(backend).await;
    let (status, body) =
        post_invoke(&base, json!({"tool": "lookup_codes", "arguments": {}})).await;
    assert_eq!(status, 504);
    assert_eq!(body["error"]["kind"], json!("UpstreamTimeout"));
}

#[tokio::test]
async fn invoke_accepts_a_legacy_request_id_without_echoing_it() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(backend).await;
    let (status, body) = post_invoke(
        &base,
        json!({"tool": "lookup_codes", "arguments": {}, "request_id": "abc-123"}),
    )
    .await;
    assert_eq!(status, 200);
    assert!(body.get("request_id").is_none());
}

#[tokio::test]
async fn narrow_accept_headers_are_normalized_rather_than_rejected() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(backend).await;
    let client = reqwest::Client::new();
    for accept in ["application/json", "text/event-stream"] {
        let response = client
            .post(format!("{base}/invoke"))
            .header("accept", accept)
            .json(&json!({"tool": "lookup_codes", "arguments": {}}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200, "accept {accept} must be tolerated");
    }
    let response = client
        .post(format!("{base}/invoke"))
        .header("accept", "text/html")
        .json(&json!({"tool": "lookup_codes", "arguments": {}}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 406);
}

#[tokio::test]
async fn invoke_serves_reference_tools_without_a_backend() {
    let backend = SpyBackend::new(SpyReply::Status(500));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) = post_invoke(&base, json!({"tool": "chart_types"})).await;
    assert_eq!(status, 200);
    assert!(body["result"]["chart_types"].is_object());
    assert_eq!(backend.calls(), 0);
}

// ============================================================================
// SECTION: Error Masking
// ============================================================================

#[tokio::test]
async fn masked_errors_withhold_internal_detail() {
    let backend = SpyBackend::new(SpyReply::Status(503));
    let state = gateway_state(backend, ServerTransport::Http, true);
    let base = spawn_router(build_router(state, ServerTransport::Http)).await;
    let (status, body) =
        post_invoke(&base, json!({"tool": "lookup_codes", "arguments": {}})).await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["kind"], json!("UpstreamServerError"));
    assert!(body["error"].get("detail").is_none());
}

#[tokio::test]
async fn unmasked_errors_carry_internal_detail() {
    let backend = SpyBackend::new(SpyReply::Status(503));
    let state = gateway_state(backend, ServerTransport::Http, false);
    let base = spawn_router(build_router(state, ServerTransport::Http)).await;
    let (_status, body) =
        post_invoke(&base, json!({"tool": "lookup_codes", "arguments": {}})).await;
    assert!(body["error"]["detail"].as_str().unwrap().contains("503"));
}

// ============================================================================
// SECTION: Health Probe
// ============================================================================

#[tokio::test]
async fn health_reports_registry_size_without_dispatch() {
    let backend = SpyBackend::new(SpyReply::Status(500));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let client = reqwest::Client::new();
    let response = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("storescope"));
    assert_eq!(body["transport"], json!("http"));
    assert_eq!(body["api_base_url"], json!("https://analytics.example"));
    assert_eq!(body["tools_available"], json!(3));
    assert_eq!(backend.calls(), 0);
}

// ============================================================================
// SECTION: JSON-RPC Transport
// ============================================================================

#[tokio::test]
async fn rpc_lists_tools_with_generated_schemas() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(backend).await;
    let (status, body) =
        post_rpc(&base, json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})).await;
    assert_eq!(status, 200);
    let tools = body["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 3);
    for tool in tools {
        assert!(tool["input_schema"]["properties"].is_object());
    }
}

#[tokio::test]
async fn rpc_tool_calls_return_json_content() {
    let backend = SpyBackend::new(SpyReply::Body(json!([{"code": "US"}])));
    let base = spawn_http_gateway(backend).await;
    let (status, body) = post_rpc(
        &base,
        json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/call",
            "params": {"name": "lookup_codes", "arguments": {}},
        }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["id"], json!(7));
    let content = &body["result"]["content"][0];
    assert_eq!(content["type"], json!("json"));
    assert_eq!(content["json"]["total_count"], json!(1));
}

#[tokio::test]
async fn rpc_validation_failures_use_the_invalid_params_code() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(Arc::clone(&backend)).await;
    let (status, body) = post_rpc(
        &base,
        json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "sales_estimates", "arguments": {"os": "ios"}},
        }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!(-32602));
    assert!(body["error"]["message"].as_str().unwrap().contains("app_ids"));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn rpc_rejects_unknown_methods_and_bad_versions() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let base = spawn_http_gateway(backend).await;
    let (status, body) =
        post_rpc(&base, json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!(-32601));
    let (status, body) =
        post_rpc(&base, json!({"jsonrpc": "1.0", "id": 4, "method": "tools/list"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!(-32600));
}

#[tokio::test]
async fn rpc_oversized_bodies_are_rejected() {
    let backend = SpyBackend::new(SpyReply::Body(json!([])));
    let state = gateway_state(backend, ServerTransport::Http, true);
    let base = spawn_router(build_router(state, ServerTransport::Http)).await;
    let client = reqwest::Client::new();
    let padding = "x".repeat(1_536 * 1024);
    let response = client
        .post(format!("{base}/rpc"))
        .json(&json!({"jsonrpc": "2.0", "id": 5, "method": "tools/list", "params": padding}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 413);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["error"]["code"], json!(-32070));
}

// ============================================================================
// SECTION: SSE Transport
// ============================================================================

#[tokio::test]
async fn sse_delivers_the_response_as_one_event() {
    let backend = SpyBackend::new(SpyReply::Body(json!([{"code": "US"}])));
    let state = gateway_state(backend, ServerTransport::Sse, true);
    let base = spawn_router(build_router(state, ServerTransport::Sse)).await;
    let client = reqwest::Client::new();
    let response = client
        .post(format!("{base}/rpc"))
        .json(&json!({
            "jsonrpc": "2.0",
            "id": 9,
            "method": "tools/call",
            "params": {"name": "lookup_codes", "arguments": {}},
        }))
        .send()
        .await
        .unwrap();
    assert!(
        response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("text/event-stream"))
    );
    let text = response.text().await.unwrap();
    let payload = text
        .lines()
        .find_map(|line| line.strip_prefix("data: "))
        .expect("sse body must carry one data event");
    let body: Value = serde_json::from_str(payload).unwrap();
    assert_eq!(body["id"], json!(9));
    assert_eq!(body["result"]["content"][0]["json"]["total_count"], json!(1));
}
