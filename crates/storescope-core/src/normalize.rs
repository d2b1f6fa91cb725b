// crates/storescope-core/src/normalize.rs
// ============================================================================
// Module: Result Normalizer
// Description: Canonical envelope normalization for backend payloads.
// Purpose: Guarantee a type-stable mapping response for every tool.
// Dependencies: storescope-core::descriptor, serde_json
// ============================================================================

//! ## Overview
//! The remote API returns objects for some operations, bare lists for others,
//! and single-key wrapper objects for a few. Normalization collapses all of
//! these into one contract: every response is a mapping, and list-shaped
//! results always appear as `{"items": [...], "total_count": N}`.
//! Normalization is total and idempotent; malformed payloads degrade to the
//! empty canonical envelope instead of failing the invocation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::descriptor::OutputHint;

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes a raw backend payload into the canonical envelope shape.
///
/// Rules, in order:
/// - a bare list is wrapped as `{"items": <list>, "total_count": <len>}`;
/// - an already-canonical envelope is returned unchanged;
/// - under [`OutputHint::ListOfObjects`], an object whose only key holds a
///   list is re-keyed to the canonical envelope;
/// - any other object passes through unchanged;
/// - scalars and null degrade to the empty canonical envelope.
#[must_use]
pub fn normalize(body: Value, hint: OutputHint) -> Value {
    match body {
        Value::Array(items) => wrap_items(items),
        Value::Object(map) => normalize_object(map, hint),
        _ => wrap_items(Vec::new()),
    }
}

/// Normalizes an object payload per the envelope rules.
fn normalize_object(mut map: Map<String, Value>, hint: OutputHint) -> Value {
    if is_canonical(&map) {
        return Value::Object(map);
    }
    if hint == OutputHint::ListOfObjects
        && map.len() == 1
        && let Some(key) = map.keys().next().cloned()
    {
        match map.remove(&key) {
            Some(Value::Array(items)) => return wrap_items(items),
            Some(other) => {
                map.insert(key, other);
            }
            None => {}
        }
    }
    Value::Object(map)
}

/// Builds the canonical envelope around a result list.
fn wrap_items(items: Vec<Value>) -> Value {
    let total = items.len();
    json!({
        "items": items,
        "total_count": total,
    })
}

/// Returns true when a mapping is already a canonical envelope.
fn is_canonical(map: &Map<String, Value>) -> bool {
    map.get("items").is_some_and(Value::is_array)
        && map.get("total_count").is_some_and(Value::is_u64)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
