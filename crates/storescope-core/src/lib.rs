// crates/storescope-core/src/lib.rs
// ============================================================================
// Module: Storescope Core
// Description: Invocation gateway and normalization layer for Storescope.
// Purpose: Validate, dispatch, and normalize analytics tool invocations.
// Dependencies: serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! Storescope Core is the invocation gateway shared by every transport
//! front-end. It owns the immutable tool registry, the parameter validator,
//! the result normalizer, the bounded error taxonomy, and the dispatcher that
//! orchestrates a single invocation. The backend HTTP client is abstracted
//! behind [`Backend`] so transports and tests share one entry point.
//! Security posture: tool arguments are untrusted and validation fails closed
//! before any outbound request is issued.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod telemetry;
pub mod validate;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::OutputHint;
pub use descriptor::ParamKind;
pub use descriptor::ParamSpec;
pub use descriptor::ToolDescriptor;
pub use descriptor::ToolEndpoint;
pub use dispatch::Backend;
pub use dispatch::Dispatcher;
pub use dispatch::InvocationRequest;
pub use dispatch::InvocationResult;
pub use dispatch::RawResponse;
pub use dispatch::TransportKind;
pub use error::BackendError;
pub use error::DispatchError;
pub use error::ErrorEnvelope;
pub use error::ErrorKind;
pub use normalize::normalize;
pub use registry::RegistryError;
pub use registry::ToolRegistry;
pub use telemetry::GatewayMetrics;
pub use telemetry::InvocationMetricEvent;
pub use telemetry::InvocationOutcome;
pub use telemetry::NoopMetrics;
pub use validate::CanonicalQuery;
pub use validate::ValidationError;
pub use validate::validate;
