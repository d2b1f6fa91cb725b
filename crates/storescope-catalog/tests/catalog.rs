// crates/storescope-catalog/tests/catalog.rs
// ============================================================================
// Module: Catalog Integration Tests
// Description: Registry construction and contract integrity checks.
// Purpose: Prove the full catalog builds and its declared contracts hold.
// Dependencies: storescope-catalog, storescope-core, serde_json
// ============================================================================

//! ## Overview
//! These tests build the complete catalog the way the server does at startup
//! and assert the properties the rest of the system relies on: the registry
//! builds, every listing schema agrees with its validator contract, and the
//! alias tables resolve the spellings the remote API does not document.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use storescope_core::ParamKind;
use storescope_core::ToolEndpoint;
use storescope_core::validate;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn full_catalog_builds_a_registry() {
    let registry = storescope_catalog::registry().expect("catalog must build");
    assert_eq!(registry.len(), storescope_catalog::descriptors().len());
    assert!(registry.lookup("get_app_metadata").is_some());
    assert!(registry.lookup("get_country_codes").is_some());
    assert!(registry.lookup("no_such_tool").is_none());
}

#[test]
fn listing_definitions_cover_every_tool() {
    let registry = storescope_catalog::registry().unwrap();
    let definitions = storescope_catalog::tool_definitions(&registry);
    assert_eq!(definitions.len(), registry.len());
    for definition in &definitions {
        let descriptor = registry.lookup(&definition.name).expect("listed tool must resolve");
        assert!(!definition.description.is_empty(), "{} has no description", definition.name);
        let required = definition.input_schema["required"].as_array().unwrap();
        let declared: Vec<&str> = descriptor
            .params
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.as_str())
            .collect();
        let listed: Vec<&str> = required.iter().filter_map(Value::as_str).collect();
        assert_eq!(listed, declared, "{} required set drifted", definition.name);
    }
}

#[test]
fn every_remote_path_parameter_is_declared() {
    for descriptor in storescope_catalog::descriptors() {
        let ToolEndpoint::Remote {
            path,
        } = &descriptor.endpoint
        else {
            continue;
        };
        for spec in &descriptor.params {
            if spec.path_bound {
                assert!(
                    path.contains(&format!("{{{}}}", spec.name)),
                    "{}: {} is path-bound but absent from {path}",
                    descriptor.name,
                    spec.name
                );
            }
        }
    }
}

#[test]
fn network_aliases_resolve_through_catalog_tools() {
    let registry = storescope_catalog::registry().unwrap();
    let descriptor = registry.lookup("get_creatives").unwrap();
    let args: Map<String, Value> = [
        ("os".to_string(), json!("ios")),
        ("app_ids".to_string(), json!("284882215")),
        ("start_date".to_string(), json!("2024-01-01")),
        ("countries".to_string(), json!("US")),
        ("networks".to_string(), json!("facebook,google")),
        ("ad_types".to_string(), json!("video")),
    ]
    .into_iter()
    .collect();
    let query = validate(descriptor, &args).unwrap();
    assert_eq!(query.params.get("networks").map(String::as_str), Some("Instagram,Youtube"));

    let mut rejected = args;
    rejected.insert("networks".to_string(), json!("not-a-network"));
    assert!(validate(descriptor, &rejected).is_err());
}

#[test]
fn sponsor_search_accepts_apple_search_ads_but_creatives_does_not() {
    let registry = storescope_catalog::registry().unwrap();
    let sponsor = registry.lookup("top_apps_search").unwrap();
    let network = sponsor.param("network").unwrap();
    assert!(network.allowed.iter().any(|value| value == "Apple Search Ads"));
    let creatives = registry.lookup("get_creatives").unwrap();
    let networks = creatives.param("networks").unwrap();
    assert!(!networks.allowed.iter().any(|value| value == "Apple Search Ads"));
}

#[test]
fn estimate_tools_share_the_sales_report_contract() {
    let registry = storescope_catalog::registry().unwrap();
    for name in ["get_download_estimates", "get_revenue_estimates"] {
        let descriptor = registry.lookup(name).unwrap();
        let ToolEndpoint::Remote {
            path,
        } = &descriptor.endpoint
        else {
            panic!("{name} must be a remote tool");
        };
        assert_eq!(path, "/v1/{os}/sales_report_estimates");
        assert!(descriptor.param("start_date").is_some_and(|spec| spec.required));
        assert!(descriptor.param("end_date").is_some_and(|spec| spec.required));
    }
}

#[test]
fn metadata_list_ceiling_matches_the_documented_limit() {
    let registry = storescope_catalog::registry().unwrap();
    let metadata = registry.lookup("get_app_metadata").unwrap();
    assert_eq!(metadata.param("app_ids").and_then(|spec| spec.max_items), Some(100));
    let impressions = registry.lookup("get_impressions").unwrap();
    assert_eq!(impressions.param("app_ids").and_then(|spec| spec.max_items), Some(5));
}

#[test]
fn granularity_spellings_resolve_to_the_short_period_form() {
    let registry = storescope_catalog::registry().unwrap();
    let descriptor = registry.lookup("get_usage_active_users").unwrap();
    let args: Map<String, Value> = [
        ("os".to_string(), json!("unified")),
        ("app_ids".to_string(), json!("55c5028102ac64f9c0001fa6")),
        ("start_date".to_string(), json!("2024-01-01")),
        ("end_date".to_string(), json!("2024-01-31")),
        ("date_granularity".to_string(), json!("monthly")),
    ]
    .into_iter()
    .collect();
    let query = validate(descriptor, &args).unwrap();
    assert_eq!(query.params.get("time_period").map(String::as_str), Some("month"));
    assert!(!query.params.contains_key("date_granularity"));
}

#[test]
fn reference_tools_carry_no_remote_endpoint() {
    let registry = storescope_catalog::registry().unwrap();
    for name in ["get_country_codes", "get_category_ids", "get_chart_types"] {
        let descriptor = registry.lookup(name).unwrap();
        assert!(
            matches!(descriptor.endpoint, ToolEndpoint::Reference { .. }),
            "{name} must be served locally"
        );
    }
}

#[test]
fn chart_type_enum_matches_the_reference_dataset() {
    let registry = storescope_catalog::registry().unwrap();
    let rankings = registry.lookup("get_category_rankings").unwrap();
    let chart_type = rankings.param("chart_type").unwrap();
    assert_eq!(chart_type.kind, ParamKind::Enum);
    assert_eq!(chart_type.allowed.as_slice(), storescope_catalog::reference::CHART_TYPES);
}
