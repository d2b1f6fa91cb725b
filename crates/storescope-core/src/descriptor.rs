// crates/storescope-core/src/descriptor.rs
// ============================================================================
// Module: Tool Descriptors
// Description: Immutable per-tool contracts for the invocation gateway.
// Purpose: Declare parameter schemas, endpoint bindings, and output hints.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A [`ToolDescriptor`] is the complete contract for one analytics operation:
//! its parameter specifications, the remote endpoint template (or a local
//! reference dataset), and the hint driving response normalization.
//! Descriptors are built once at startup and shared read-only across all
//! concurrent invocations; nothing here is mutated after registry
//! construction.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Parameter Specifications
// ============================================================================

/// Value kinds accepted by tool parameters.
///
/// # Invariants
/// - Variants are stable; the validator coerces every accepted value into a
///   canonical string form for query construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Free-form string value.
    String,
    /// String restricted to an allowed set, with optional aliases.
    Enum,
    /// Signed integer value.
    Integer,
    /// Boolean value.
    Boolean,
    /// Calendar date in `YYYY-MM-DD` form.
    Date,
    /// Comma-separated list of non-empty elements.
    CommaList,
}

impl ParamKind {
    /// Returns a stable label used in validation error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Enum => "enum",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Date => "date (YYYY-MM-DD)",
            Self::CommaList => "comma-separated list",
        }
    }
}

/// Specification for a single tool parameter.
///
/// # Invariants
/// - `aliases` keys are lowercase accepted spellings; values are the
///   canonical spellings the remote API expects.
/// - When `allowed` is non-empty the canonical value must be a member.
/// - `path_bound` parameters are required and resolve an endpoint template
///   placeholder instead of becoming a query parameter.
/// - `wire_name`, when set, is the query parameter name the remote API
///   expects in place of the caller-facing `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Caller-facing parameter name.
    pub name: String,
    /// Accepted value kind.
    pub kind: ParamKind,
    /// Whether the parameter must be supplied by the caller.
    pub required: bool,
    /// Default canonical value applied when an optional parameter is absent.
    pub default: Option<String>,
    /// Accepted spelling to canonical value mapping.
    pub aliases: BTreeMap<String, String>,
    /// Allowed canonical values for enum and constrained list parameters.
    pub allowed: Vec<String>,
    /// Maximum element count for comma-separated list parameters.
    pub max_items: Option<usize>,
    /// Whether the parameter binds an endpoint path placeholder.
    pub path_bound: bool,
    /// Remote query parameter name when it differs from `name`.
    pub wire_name: Option<String>,
}

impl ParamSpec {
    /// Creates a required parameter of the given kind.
    #[must_use]
    pub fn required(name: &str, kind: ParamKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
            default: None,
            aliases: BTreeMap::new(),
            allowed: Vec::new(),
            max_items: None,
            path_bound: false,
            wire_name: None,
        }
    }

    /// Creates an optional parameter of the given kind.
    #[must_use]
    pub fn optional(name: &str, kind: ParamKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    /// Sets the default canonical value applied when the parameter is absent.
    #[must_use]
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// Sets the allowed canonical values.
    #[must_use]
    pub fn with_allowed(mut self, allowed: &[&str]) -> Self {
        self.allowed = allowed.iter().map(ToString::to_string).collect();
        self
    }

    /// Sets the accepted spelling to canonical value alias table.
    ///
    /// Keys are stored lowercase so lookups are case-insensitive.
    #[must_use]
    pub fn with_aliases(mut self, aliases: &[(&str, &str)]) -> Self {
        self.aliases = aliases
            .iter()
            .map(|(accepted, canonical)| (accepted.to_lowercase(), (*canonical).to_string()))
            .collect();
        self
    }

    /// Sets the maximum element count for a comma-separated list parameter.
    #[must_use]
    pub const fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Marks the parameter as binding an endpoint path placeholder.
    #[must_use]
    pub const fn bound_to_path(mut self) -> Self {
        self.path_bound = true;
        self
    }

    /// Sets the remote query parameter name when it differs from `name`.
    #[must_use]
    pub fn on_wire(mut self, wire_name: &str) -> Self {
        self.wire_name = Some(wire_name.to_string());
        self
    }
}

// ============================================================================
// SECTION: Endpoints and Output Hints
// ============================================================================

/// Target of a tool invocation.
///
/// # Invariants
/// - `Remote` paths may contain `{name}` placeholders, each matching exactly
///   one `path_bound` parameter on the owning descriptor.
/// - `Reference` datasets are static JSON served without a backend call;
///   when `select_by` names a parameter, the dataset is an object keyed by
///   that parameter's canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolEndpoint {
    /// Remote analytics API endpoint template.
    Remote {
        /// Path template, e.g. `/v1/{os}/sales_report_estimates`.
        path: String,
    },
    /// Local reference dataset answered without a backend call.
    Reference {
        /// Static payload returned to the caller.
        dataset: Value,
        /// Parameter whose canonical value selects a dataset entry.
        select_by: Option<String>,
    },
}

impl ToolEndpoint {
    /// Creates a remote endpoint from a path template.
    #[must_use]
    pub fn remote(path: &str) -> Self {
        Self::Remote {
            path: path.to_string(),
        }
    }

    /// Creates a local reference endpoint from a static dataset.
    #[must_use]
    pub const fn reference(dataset: Value) -> Self {
        Self::Reference {
            dataset,
            select_by: None,
        }
    }

    /// Creates a parameter-keyed local reference endpoint.
    #[must_use]
    pub fn reference_keyed(dataset: Value, select_by: &str) -> Self {
        Self::Reference {
            dataset,
            select_by: Some(select_by.to_string()),
        }
    }
}

/// Expected shape of a tool's raw backend payload.
///
/// # Invariants
/// - The hint never changes the meaning of a payload; it only drives the
///   normalizer's re-keying rule for single-key wrapper objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputHint {
    /// The backend returns a mapping.
    Object,
    /// The backend returns a list of objects, possibly wrapped.
    ListOfObjects,
}

// ============================================================================
// SECTION: Tool Descriptor
// ============================================================================

/// Complete contract for one analytics operation.
///
/// # Invariants
/// - `name` is unique within a registry.
/// - `params` order is the validation order; validation fails fast on the
///   first violated specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description for tool listings.
    pub description: String,
    /// Ordered parameter specifications.
    pub params: Vec<ParamSpec>,
    /// Invocation target.
    pub endpoint: ToolEndpoint,
    /// Expected raw payload shape.
    pub output: OutputHint,
}

impl ToolDescriptor {
    /// Creates a descriptor for a remote analytics operation.
    #[must_use]
    pub fn remote(name: &str, description: &str, path: &str, output: OutputHint) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            endpoint: ToolEndpoint::remote(path),
            output,
        }
    }

    /// Creates a descriptor for a local reference dataset.
    #[must_use]
    pub fn reference(name: &str, description: &str, dataset: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            endpoint: ToolEndpoint::reference(dataset),
            output: OutputHint::Object,
        }
    }

    /// Creates a descriptor for a parameter-keyed local reference dataset.
    #[must_use]
    pub fn reference_keyed(
        name: &str,
        description: &str,
        dataset: Value,
        select_by: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            params: Vec::new(),
            endpoint: ToolEndpoint::reference_keyed(dataset, select_by),
            output: OutputHint::Object,
        }
    }

    /// Appends a parameter specification.
    #[must_use]
    pub fn with_param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Returns the parameter specification with the given name, if declared.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
