// crates/storescope-core/src/validate.rs
// ============================================================================
// Module: Parameter Validator
// Description: Fail-fast argument validation and canonicalization.
// Purpose: Produce canonical queries before any outbound request is issued.
// Dependencies: storescope-core::descriptor, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! The validator checks a raw argument mapping against a tool descriptor and
//! produces a [`CanonicalQuery`]: the fully resolved endpoint path plus a
//! flat map of canonical query parameters. Validation is pure and fails fast
//! on the first violated specification; no backend call can happen until
//! every parameter has been accepted. Alias resolution, type coercion, list
//! splitting, and defaults all happen here so downstream stages only ever
//! see canonical values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::descriptor::ParamKind;
use crate::descriptor::ParamSpec;
use crate::descriptor::ToolDescriptor;
use crate::descriptor::ToolEndpoint;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Calendar date format accepted for date parameters.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Argument validation failures.
///
/// # Invariants
/// - Every variant names the offending parameter; messages are safe to
///   surface to callers verbatim.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The arguments payload was not a JSON object.
    #[error("arguments must be a JSON object")]
    ArgumentsNotObject,
    /// A required parameter was absent.
    #[error("missing required parameter {0}")]
    MissingRequired(String),
    /// An argument name is not declared by the tool.
    #[error("unknown parameter {0}")]
    UnknownParameter(String),
    /// A value could not be coerced to the declared kind.
    #[error("parameter {name} expects {expected}")]
    InvalidType {
        /// Offending parameter name.
        name: String,
        /// Expected kind label.
        expected: &'static str,
    },
    /// A date value was not a valid `YYYY-MM-DD` calendar date.
    #[error("parameter {name} value {value:?} is not a valid date (YYYY-MM-DD)")]
    InvalidDate {
        /// Offending parameter name.
        name: String,
        /// Rejected raw value.
        value: String,
    },
    /// A comma-separated list contained an empty element.
    #[error("parameter {name} contains an empty list element")]
    EmptyListElement {
        /// Offending parameter name.
        name: String,
    },
    /// A comma-separated list exceeded its declared element ceiling.
    #[error("parameter {name} accepts at most {max} elements")]
    TooManyElements {
        /// Offending parameter name.
        name: String,
        /// Declared maximum element count.
        max: usize,
    },
    /// A value matched neither the allowed set nor a declared alias.
    #[error("parameter {name} value {value:?} is not allowed; allowed values: {allowed}")]
    NotAllowed {
        /// Offending parameter name.
        name: String,
        /// Rejected raw value.
        value: String,
        /// Comma-joined allowed set for the error message.
        allowed: String,
    },
}

// ============================================================================
// SECTION: Canonical Query
// ============================================================================

/// Validated, alias-resolved invocation arguments.
///
/// # Invariants
/// - `path` has no unresolved placeholders.
/// - `params` values are canonical strings ready for query construction.
/// - Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalQuery {
    /// Fully resolved endpoint path.
    pub path: String,
    /// Canonical parameter name to canonical value.
    pub params: BTreeMap<String, String>,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates raw arguments against a descriptor and builds a canonical query.
///
/// Parameters are checked in declaration order and validation stops at the
/// first violation, so no partial coercion is observable.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the first violated specification.
pub fn validate(
    descriptor: &ToolDescriptor,
    args: &Map<String, Value>,
) -> Result<CanonicalQuery, ValidationError> {
    let mut path_values: BTreeMap<String, String> = BTreeMap::new();
    let mut params: BTreeMap<String, String> = BTreeMap::new();

    for spec in &descriptor.params {
        let canonical = match args.get(&spec.name) {
            Some(raw) => Some(coerce(spec, raw)?),
            None if spec.required => {
                return Err(ValidationError::MissingRequired(spec.name.clone()));
            }
            None => spec.default.clone(),
        };
        let Some(canonical) = canonical else {
            continue;
        };
        if spec.path_bound {
            path_values.insert(spec.name.clone(), canonical);
        } else {
            let key = spec.wire_name.clone().unwrap_or_else(|| spec.name.clone());
            params.insert(key, canonical);
        }
    }

    for name in args.keys() {
        if descriptor.param(name).is_none() {
            return Err(ValidationError::UnknownParameter(name.clone()));
        }
    }

    let path = match &descriptor.endpoint {
        ToolEndpoint::Remote {
            path,
        } => resolve_path(path, &path_values),
        ToolEndpoint::Reference {
            ..
        } => String::new(),
    };
    Ok(CanonicalQuery {
        path,
        params,
    })
}

/// Substitutes path-bound values into an endpoint template.
fn resolve_path(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut path = template.to_string();
    for (name, value) in values {
        path = path.replace(&format!("{{{name}}}"), value);
    }
    path
}

// ============================================================================
// SECTION: Coercion
// ============================================================================

/// Coerces one raw value into its canonical string form.
fn coerce(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    match spec.kind {
        ParamKind::String => coerce_string(spec, raw),
        ParamKind::Enum => {
            let value = string_value(spec, raw)?;
            resolve_choice(spec, value.trim())
        }
        ParamKind::Integer => coerce_integer(spec, raw),
        ParamKind::Boolean => coerce_boolean(spec, raw),
        ParamKind::Date => coerce_date(spec, raw),
        ParamKind::CommaList => coerce_list(spec, raw),
    }
}

/// Coerces free-form string parameters, accepting numeric scalars.
fn coerce_string(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    match raw {
        Value::String(value) => Ok(value.clone()),
        Value::Number(value) => Ok(value.to_string()),
        _ => Err(ValidationError::InvalidType {
            name: spec.name.clone(),
            expected: spec.kind.as_str(),
        }),
    }
}

/// Coerces integer parameters from numbers or numeric strings.
fn coerce_integer(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    let parsed = match raw {
        Value::Number(value) => value.as_i64(),
        Value::String(value) => value.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.map(|value| value.to_string()).ok_or_else(|| ValidationError::InvalidType {
        name: spec.name.clone(),
        expected: spec.kind.as_str(),
    })
}

/// Coerces boolean parameters from booleans or `true`/`false` strings.
fn coerce_boolean(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    let parsed = match raw {
        Value::Bool(value) => Some(*value),
        Value::String(value) => match value.trim().to_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.map(|value| value.to_string()).ok_or_else(|| ValidationError::InvalidType {
        name: spec.name.clone(),
        expected: spec.kind.as_str(),
    })
}

/// Coerces date parameters, requiring a real `YYYY-MM-DD` calendar date.
fn coerce_date(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    let value = string_value(spec, raw)?;
    let trimmed = value.trim();
    if Date::parse(trimmed, DATE_FORMAT).is_err() {
        return Err(ValidationError::InvalidDate {
            name: spec.name.clone(),
            value: trimmed.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Coerces comma-separated list parameters element by element.
fn coerce_list(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    let value = string_value(spec, raw)?;
    let mut elements = Vec::new();
    for element in value.split(',') {
        let element = element.trim();
        if element.is_empty() {
            return Err(ValidationError::EmptyListElement {
                name: spec.name.clone(),
            });
        }
        let canonical = if spec.allowed.is_empty() && spec.aliases.is_empty() {
            element.to_string()
        } else {
            resolve_choice(spec, element)?
        };
        elements.push(canonical);
    }
    if let Some(max) = spec.max_items
        && elements.len() > max
    {
        return Err(ValidationError::TooManyElements {
            name: spec.name.clone(),
            max,
        });
    }
    Ok(elements.join(","))
}

/// Extracts a string scalar or fails with the declared kind.
fn string_value(spec: &ParamSpec, raw: &Value) -> Result<String, ValidationError> {
    match raw {
        Value::String(value) => Ok(value.clone()),
        _ => Err(ValidationError::InvalidType {
            name: spec.name.clone(),
            expected: spec.kind.as_str(),
        }),
    }
}

/// Resolves a raw spelling through the alias table and allowed set.
///
/// Exact canonical matches win; otherwise the lowercase spelling is looked up
/// in the alias table. Anything else fails listing the allowed set.
fn resolve_choice(spec: &ParamSpec, raw: &str) -> Result<String, ValidationError> {
    if spec.allowed.iter().any(|allowed| allowed == raw) {
        return Ok(raw.to_string());
    }
    if let Some(canonical) = spec.aliases.get(&raw.to_lowercase())
        && (spec.allowed.is_empty() || spec.allowed.iter().any(|allowed| allowed == canonical))
    {
        return Ok(canonical.clone());
    }
    if spec.allowed.is_empty() {
        return Ok(raw.to_string());
    }
    Err(ValidationError::NotAllowed {
        name: spec.name.clone(),
        value: raw.to_string(),
        allowed: spec.allowed.join(", "),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
