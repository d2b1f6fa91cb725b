// crates/storescope-backend/tests/http_backend.rs
// ============================================================================
// Module: HTTP Backend Tests
// Description: Retry, credential, and timeout behavior against a local server.
// Purpose: Prove the retry policy and credential injection on the wire.
// Dependencies: storescope-backend, storescope-core, tiny_http, tokio
// ============================================================================

//! ## Overview
//! These tests run the backend client against a local `tiny_http` server and
//! count actual requests on the wire: 5xx responses are retried up to the
//! attempt ceiling, 4xx responses get exactly one attempt, the credential
//! rides in the query string, and timeouts map to the timeout error.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use storescope_backend::ApiToken;
use storescope_backend::HttpBackend;
use storescope_backend::HttpBackendConfig;
use storescope_core::Backend;
use storescope_core::BackendError;
use storescope_core::CanonicalQuery;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Scripted reply served for one request.
#[derive(Debug, Clone)]
enum Reply {
    /// Respond with the status code and body.
    Status(u16, &'static str),
    /// Sleep before responding, to trip the client timeout.
    Slow(Duration),
}

/// Spawns a local server that serves the scripted replies in order and
/// records the URL of every request it received.
///
/// The last reply is repeated if more requests arrive than were scripted.
fn spawn_server(replies: Vec<Reply>) -> (String, Arc<Mutex<Vec<String>>>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let url = format!("http://{addr}");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_writer = Arc::clone(&seen);

    thread::spawn(move || {
        let mut served = 0_usize;
        while let Ok(request) = server.recv() {
            seen_writer.lock().unwrap().push(request.url().to_string());
            let reply = replies.get(served).or_else(|| replies.last()).cloned();
            served += 1;
            match reply {
                Some(Reply::Status(status, body)) => {
                    let response = Response::from_string(body).with_status_code(status);
                    let _ = request.respond(response);
                }
                Some(Reply::Slow(delay)) => {
                    thread::sleep(delay);
                    let response = Response::from_string("{}").with_status_code(200);
                    let _ = request.respond(response);
                }
                None => break,
            }
        }
    });

    (url, seen)
}

/// Builds a backend with fast retries pointed at the local server.
fn local_backend(base_url: &str) -> HttpBackend {
    HttpBackend::new(
        HttpBackendConfig {
            base_url: base_url.to_string(),
            timeout_ms: 2_000,
            max_attempts: 3,
            backoff_initial_ms: 10,
            backoff_cap_ms: 20,
            ..HttpBackendConfig::default()
        },
        ApiToken::new("test-token"),
    )
    .unwrap()
}

/// Canonical query for a parameterless lookup endpoint.
fn lookup_query() -> CanonicalQuery {
    CanonicalQuery {
        path: "/v1/lookup_codes".to_string(),
        params: BTreeMap::from([("country".to_string(), "US".to_string())]),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[tokio::test]
async fn success_returns_the_decoded_body_with_credential_on_the_wire() {
    let (url, seen) = spawn_server(vec![Reply::Status(200, r#"[{"code":"US"}]"#)]);
    let backend = local_backend(&url);
    let response = backend.send(&lookup_query()).await.unwrap();
    assert_eq!(response.status, 200);
    assert!(response.body.is_array());

    let requests = seen.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("/v1/lookup_codes?"));
    assert!(requests[0].contains("auth_token=test-token"));
    assert!(requests[0].contains("country=US"));
}

#[tokio::test]
async fn persistent_5xx_is_retried_to_the_attempt_ceiling() {
    let (url, seen) = spawn_server(vec![Reply::Status(503, r#"{"error":"unavailable"}"#)]);
    let backend = local_backend(&url);
    let err = backend.send(&lookup_query()).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 503, .. }));
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn transient_5xx_recovers_within_the_ceiling() {
    let (url, seen) = spawn_server(vec![
        Reply::Status(503, "{}"),
        Reply::Status(503, "{}"),
        Reply::Status(200, r#"{"items":[],"total_count":0}"#),
    ]);
    let backend = local_backend(&url);
    let response = backend.send(&lookup_query()).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn a_4xx_response_gets_exactly_one_attempt() {
    let (url, seen) = spawn_server(vec![Reply::Status(422, r#"{"error":"bad app id"}"#)]);
    let backend = local_backend(&url);
    let err = backend.send(&lookup_query()).await.unwrap_err();
    let BackendError::Status {
        status,
        body,
    } = err
    else {
        panic!("expected a status error");
    };
    assert_eq!(status, 422);
    assert_eq!(body.unwrap()["error"], serde_json::json!("bad app id"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unauthorized_is_terminal_without_retry() {
    let (url, seen) = spawn_server(vec![Reply::Status(401, r#"{"error":"invalid token"}"#)]);
    let backend = local_backend(&url);
    let err = backend.send(&lookup_query()).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 401, .. }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn undecodable_success_bodies_fail_without_retry() {
    let (url, seen) = spawn_server(vec![Reply::Status(200, "not json")]);
    let backend = local_backend(&url);
    let err = backend.send(&lookup_query()).await.unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn slow_upstreams_map_to_the_timeout_error() {
    let (url, _seen) = spawn_server(vec![Reply::Slow(Duration::from_millis(500))]);
    let backend = HttpBackend::new(
        HttpBackendConfig {
            base_url: url,
            timeout_ms: 50,
            max_attempts: 2,
            backoff_initial_ms: 10,
            backoff_cap_ms: 10,
            ..HttpBackendConfig::default()
        },
        ApiToken::new("test-token"),
    )
    .unwrap();
    let err = backend.send(&lookup_query()).await.unwrap_err();
    assert!(matches!(err, BackendError::Timeout));
}

#[tokio::test]
async fn connection_refusal_maps_to_a_transport_error() {
    let backend = HttpBackend::new(
        HttpBackendConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout_ms: 500,
            max_attempts: 2,
            backoff_initial_ms: 10,
            backoff_cap_ms: 10,
            ..HttpBackendConfig::default()
        },
        ApiToken::new("test-token"),
    )
    .unwrap();
    let err = backend.send(&lookup_query()).await.unwrap_err();
    let BackendError::Transport(detail) = err else {
        panic!("expected a transport error");
    };
    assert!(!detail.contains("test-token"), "credential must not leak into diagnostics");
}
