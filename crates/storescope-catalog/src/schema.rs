// crates/storescope-catalog/src/schema.rs
// ============================================================================
// Module: Tool Listing Schemas
// Description: JSON input schemas generated from tool descriptors.
// Purpose: Drive MCP tool listings from the declared parameter contracts.
// Dependencies: storescope-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Every transport lists tools through the same [`ToolDefinition`] shape: the
//! tool name, its description, and a JSON Schema generated from the declared
//! [`ParamSpec`]s. Generating the schema from the descriptor keeps the listed
//! contract and the enforced contract identical by construction; there is no
//! second hand-maintained schema to drift.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::ToolDescriptor;

// ============================================================================
// SECTION: Tool Definition
// ============================================================================

/// Tool definition used by MCP tool listings.
///
/// # Invariants
/// - `name` is a stable tool identifier.
/// - `input_schema` is a JSON Schema payload generated from the descriptor's
///   parameter specifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
}

impl ToolDefinition {
    /// Builds the listing definition for one descriptor.
    #[must_use]
    pub fn from_descriptor(descriptor: &ToolDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            input_schema: input_schema(descriptor),
        }
    }
}

// ============================================================================
// SECTION: Schema Generation
// ============================================================================

/// Generates the JSON input schema for a descriptor.
///
/// Unknown properties are rejected by the validator, so the schema declares
/// `additionalProperties: false` to advertise the same contract.
#[must_use]
pub fn input_schema(descriptor: &ToolDescriptor) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for spec in &descriptor.params {
        properties.insert(spec.name.clone(), param_schema(spec));
        if spec.required {
            required.push(Value::String(spec.name.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Generates the schema fragment for one parameter specification.
fn param_schema(spec: &ParamSpec) -> Value {
    let mut schema = match spec.kind {
        ParamKind::String => json!({"type": "string"}),
        ParamKind::Enum => enum_schema(spec),
        ParamKind::Integer => json!({"type": "integer"}),
        ParamKind::Boolean => json!({"type": "boolean"}),
        ParamKind::Date => json!({
            "type": "string",
            "format": "date",
            "description": "Calendar date in YYYY-MM-DD format",
        }),
        ParamKind::CommaList => list_schema(spec),
    };
    if let Some(default) = &spec.default
        && let Some(map) = schema.as_object_mut()
    {
        map.insert("default".to_string(), default_value(spec.kind, default));
    }
    schema
}

/// Generates the schema fragment for an enum parameter.
///
/// Declared aliases are accepted spellings, so they are listed alongside the
/// canonical values to keep the advertised set honest.
fn enum_schema(spec: &ParamSpec) -> Value {
    if spec.allowed.is_empty() {
        return json!({"type": "string"});
    }
    let mut values: Vec<String> = spec.allowed.clone();
    for accepted in spec.aliases.keys() {
        if !values.iter().any(|value| value == accepted) {
            values.push(accepted.clone());
        }
    }
    json!({
        "type": "string",
        "enum": values,
    })
}

/// Generates the schema fragment for a comma-separated list parameter.
fn list_schema(spec: &ParamSpec) -> Value {
    let description = spec.max_items.map_or_else(
        || "Comma-separated list of values".to_string(),
        |max| format!("Comma-separated list of values (at most {max})"),
    );
    json!({
        "type": "string",
        "description": description,
    })
}

/// Renders a default canonical string in the parameter's JSON type.
fn default_value(kind: ParamKind, default: &str) -> Value {
    match kind {
        ParamKind::Integer => default
            .parse::<i64>()
            .map_or_else(|_| Value::String(default.to_string()), |value| json!(value)),
        ParamKind::Boolean => default
            .parse::<bool>()
            .map_or_else(|_| Value::String(default.to_string()), |value| json!(value)),
        _ => Value::String(default.to_string()),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
