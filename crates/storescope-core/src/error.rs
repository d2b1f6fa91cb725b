// crates/storescope-core/src/error.rs
// ============================================================================
// Module: Error Taxonomy
// Description: Bounded error kinds and the deterministic error mapper.
// Purpose: Surface one stable error shape across every transport.
// Dependencies: storescope-core::validate, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Every failure in the gateway collapses into one of six stable kinds. The
//! mapper from stage errors to [`ErrorEnvelope`] is pure: the same input
//! always produces the same kind and the same public message shape. Public
//! messages are caller-safe; internal detail is kept separately and is only
//! surfaced when masking is disabled.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::validate::ValidationError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of remote-provided detail echoed to callers.
const MAX_REMOTE_DETAIL_CHARS: usize = 200;

// ============================================================================
// SECTION: Error Kinds
// ============================================================================

/// Stable error taxonomy surfaced to callers.
///
/// # Invariants
/// - Labels returned by [`ErrorKind::as_str`] are part of the wire contract
///   and never change for a given variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Missing, malformed, or out-of-enum argument.
    Validation,
    /// Unknown tool name.
    NotFound,
    /// Backend 4xx response; never retried.
    UpstreamClient,
    /// Backend 5xx, network fault, or malformed backend payload.
    UpstreamServer,
    /// Backend timed out after exhausting retries.
    UpstreamTimeout,
    /// Unexpected failure inside the gateway itself.
    Internal,
}

impl ErrorKind {
    /// Returns the stable wire label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "ValidationError",
            Self::NotFound => "NotFound",
            Self::UpstreamClient => "UpstreamClientError",
            Self::UpstreamServer => "UpstreamServerError",
            Self::UpstreamTimeout => "UpstreamTimeout",
            Self::Internal => "InternalError",
        }
    }

    /// Returns the HTTP status used by the simplified gateway.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound => 404,
            Self::UpstreamClient | Self::UpstreamServer => 502,
            Self::UpstreamTimeout => 504,
            Self::Internal => 500,
        }
    }
}

// ============================================================================
// SECTION: Backend Errors
// ============================================================================

/// Failures reported by the backend client.
///
/// # Invariants
/// - `Status` is only produced for non-2xx responses; the carried body is the
///   decoded remote error payload when one was present.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Terminal non-2xx response from the remote API.
    #[error("upstream returned status {status}")]
    Status {
        /// HTTP status code from the remote API.
        status: u16,
        /// Decoded remote error body, when present.
        body: Option<Value>,
    },
    /// The request timed out after exhausting retries.
    #[error("upstream request timed out")]
    Timeout,
    /// Network-level failure after exhausting retries.
    #[error("upstream transport failure: {0}")]
    Transport(String),
    /// A 2xx response body could not be decoded as JSON.
    #[error("upstream returned an undecodable body: {0}")]
    Decode(String),
}

// ============================================================================
// SECTION: Dispatch Errors
// ============================================================================

/// Stage errors threaded through a single invocation.
///
/// # Invariants
/// - Variants map one-to-one onto the taxonomy in [`ErrorKind`] via
///   [`ErrorEnvelope::from_error`].
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The requested tool name is not registered.
    #[error("unknown tool: {0}")]
    NotFound(String),
    /// Argument validation failed; the backend was never invoked.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The backend client reported a terminal failure.
    #[error(transparent)]
    Backend(#[from] BackendError),
    /// Unexpected failure inside the gateway.
    #[error("internal error: {0}")]
    Internal(String),
}

// ============================================================================
// SECTION: Error Envelope
// ============================================================================

/// Caller-facing error representation.
///
/// # Invariants
/// - `public_message` never contains credentials or raw internal detail.
/// - A success payload and an envelope are mutually exclusive per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Taxonomy kind for the failure.
    pub kind: ErrorKind,
    /// Caller-safe message.
    pub public_message: String,
    /// Internal diagnostic detail; withheld from callers when masking is on.
    pub internal_detail: String,
}

impl ErrorEnvelope {
    /// Maps a stage error into its envelope. The mapping is pure.
    #[must_use]
    pub fn from_error(error: &DispatchError) -> Self {
        match error {
            DispatchError::NotFound(tool) => Self {
                kind: ErrorKind::NotFound,
                public_message: format!("unknown tool: {tool}"),
                internal_detail: format!("unknown tool: {tool}"),
            },
            DispatchError::Validation(err) => Self {
                kind: ErrorKind::Validation,
                public_message: err.to_string(),
                internal_detail: err.to_string(),
            },
            DispatchError::Backend(err) => Self::from_backend(err),
            DispatchError::Internal(detail) => Self {
                kind: ErrorKind::Internal,
                public_message: "internal gateway error".to_string(),
                internal_detail: detail.clone(),
            },
        }
    }

    /// Maps a backend failure into its envelope.
    fn from_backend(error: &BackendError) -> Self {
        match error {
            BackendError::Status {
                status,
                body,
            } if (400_u16..500).contains(status) => Self {
                kind: ErrorKind::UpstreamClient,
                public_message: remote_detail(*status, body.as_ref()),
                internal_detail: format!(
                    "upstream status {status}, body: {}",
                    body.clone().unwrap_or(Value::Null)
                ),
            },
            BackendError::Status {
                status,
                body,
            } => Self {
                kind: ErrorKind::UpstreamServer,
                public_message: "analytics service temporarily unavailable".to_string(),
                internal_detail: format!(
                    "upstream status {status}, body: {}",
                    body.clone().unwrap_or(Value::Null)
                ),
            },
            BackendError::Timeout => Self {
                kind: ErrorKind::UpstreamTimeout,
                public_message: "analytics service timed out".to_string(),
                internal_detail: "upstream request timed out after exhausting retries".to_string(),
            },
            BackendError::Transport(detail) => Self {
                kind: ErrorKind::UpstreamServer,
                public_message: "analytics service temporarily unavailable".to_string(),
                internal_detail: format!("upstream transport failure: {detail}"),
            },
            BackendError::Decode(detail) => Self {
                kind: ErrorKind::UpstreamServer,
                public_message: "analytics service returned an unexpected payload".to_string(),
                internal_detail: format!("upstream body decode failure: {detail}"),
            },
        }
    }
}

/// Builds the caller-safe message for a terminal 4xx response.
///
/// Remote detail is echoed only when the remote body carries a string
/// `error` or `message` field, truncated to a bounded length.
fn remote_detail(status: u16, body: Option<&Value>) -> String {
    let detail = body.and_then(|body| {
        body.get("error")
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str))
    });
    detail.map_or_else(
        || format!("upstream rejected the request (status {status})"),
        |detail| {
            let truncated: String = detail.chars().take(MAX_REMOTE_DETAIL_CHARS).collect();
            format!("upstream rejected the request (status {status}): {truncated}")
        },
    )
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use serde_json::json;

    use super::BackendError;
    use super::DispatchError;
    use super::ErrorEnvelope;
    use super::ErrorKind;
    use crate::validate::ValidationError;

    #[test]
    fn kinds_map_to_stable_labels_and_statuses() {
        assert_eq!(ErrorKind::Validation.as_str(), "ValidationError");
        assert_eq!(ErrorKind::UpstreamClient.as_str(), "UpstreamClientError");
        assert_eq!(ErrorKind::Validation.http_status(), 400);
        assert_eq!(ErrorKind::NotFound.http_status(), 404);
        assert_eq!(ErrorKind::UpstreamServer.http_status(), 502);
        assert_eq!(ErrorKind::UpstreamTimeout.http_status(), 504);
        assert_eq!(ErrorKind::Internal.http_status(), 500);
    }

    #[test]
    fn mapping_is_deterministic() {
        let error = DispatchError::Backend(BackendError::Status {
            status: 503,
            body: None,
        });
        let first = ErrorEnvelope::from_error(&error);
        let second = ErrorEnvelope::from_error(&error);
        assert_eq!(first, second);
        assert_eq!(first.kind, ErrorKind::UpstreamServer);
    }

    #[test]
    fn validation_errors_surface_the_offending_field() {
        let error =
            DispatchError::Validation(ValidationError::MissingRequired("start_date".to_string()));
        let envelope = ErrorEnvelope::from_error(&error);
        assert_eq!(envelope.kind, ErrorKind::Validation);
        assert!(envelope.public_message.contains("start_date"));
    }

    #[test]
    fn client_errors_echo_safe_remote_detail_only() {
        let with_detail = DispatchError::Backend(BackendError::Status {
            status: 422,
            body: Some(json!({"error": "Invalid network name"})),
        });
        let envelope = ErrorEnvelope::from_error(&with_detail);
        assert_eq!(envelope.kind, ErrorKind::UpstreamClient);
        assert!(envelope.public_message.contains("Invalid network name"));

        let opaque = DispatchError::Backend(BackendError::Status {
            status: 401,
            body: Some(json!({"token": "should-not-leak"})),
        });
        let envelope = ErrorEnvelope::from_error(&opaque);
        assert!(!envelope.public_message.contains("should-not-leak"));
    }

    #[test]
    fn server_faults_use_a_generic_public_message() {
        for error in [
            BackendError::Timeout,
            BackendError::Transport("connection refused".to_string()),
            BackendError::Decode("expected value".to_string()),
        ] {
            let envelope = ErrorEnvelope::from_error(&DispatchError::Backend(error));
            assert!(!envelope.public_message.contains("connection refused"));
            assert!(!envelope.public_message.contains("expected value"));
        }
    }
}
