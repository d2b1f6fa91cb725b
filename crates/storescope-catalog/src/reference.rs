// crates/storescope-catalog/src/reference.rs
// ============================================================================
// Module: Reference Dataset Tools
// Description: Local lookup tools answered without a backend call.
// Purpose: Serve country, category, and chart vocabularies uniformly.
// Dependencies: storescope-core, serde_json
// ============================================================================

//! ## Overview
//! Three lookup tools serve static vocabularies: common country codes, the
//! per-platform category identifier tables, and the ranking chart
//! identifiers. They carry no remote endpoint but flow through the same
//! dispatch and normalization path as every other tool, so transports see
//! one contract regardless of where a payload came from.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::ToolDescriptor;

// ============================================================================
// SECTION: Chart Vocabulary
// ============================================================================

/// Ranking chart identifiers accepted by the category ranking endpoint.
///
/// The three iPad identifiers are spelled exactly as the remote API expects
/// them, including the doubled `ad` in the paid and grossing variants.
pub const CHART_TYPES: &[&str] = &[
    "topfreeapplications",
    "toppaidapplications",
    "topgrossingapplications",
    "topfreeipadapplications",
    "toppaidipadadapplications",
    "topgrossingipadadapplications",
];

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Descriptors for the reference dataset tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![country_codes(), category_ids(), chart_types()]
}

/// Common country codes and their display names.
fn country_codes() -> ToolDescriptor {
    ToolDescriptor::reference(
        "get_country_codes",
        "Get available country codes for the analytics APIs.",
        json!({
            "countries": {
                "US": "United States",
                "GB": "United Kingdom",
                "DE": "Germany",
                "FR": "France",
                "JP": "Japan",
                "CN": "China",
                "KR": "South Korea",
                "CA": "Canada",
                "AU": "Australia",
                "BR": "Brazil",
                "IN": "India",
                "RU": "Russia",
                "ES": "Spain",
                "IT": "Italy",
                "NL": "Netherlands",
                "SE": "Sweden",
                "MX": "Mexico",
            }
        }),
    )
}

/// Category identifier tables for each mobile platform.
///
/// iOS categories are numeric App Store identifiers; Android categories are
/// the Google Play collection slugs.
fn category_ids() -> ToolDescriptor {
    ToolDescriptor::reference_keyed(
        "get_category_ids",
        "Get available category identifiers for the App Store and Google \
         Play.",
        json!({
            "ios": {"categories": ios_categories()},
            "android": {"categories": android_categories()},
        }),
        "os",
    )
    .with_param(ParamSpec::required("os", ParamKind::Enum).with_allowed(&["ios", "android"]))
}

/// Ranking chart identifiers and descriptions.
fn chart_types() -> ToolDescriptor {
    ToolDescriptor::reference(
        "get_chart_types",
        "List available ranking chart identifiers.",
        json!({
            "chart_types": {
                "topfreeapplications": "Top Free Apps",
                "toppaidapplications": "Top Paid Apps",
                "topgrossingapplications": "Top Grossing Apps",
                "topfreeipadapplications": "Top Free iPad Apps (iOS only)",
                "toppaidipadadapplications": "Top Paid iPad Apps (iOS only)",
                "topgrossingipadadapplications": "Top Grossing iPad Apps (iOS only)",
            }
        }),
    )
}

// ============================================================================
// SECTION: Category Tables
// ============================================================================

/// App Store category identifier table.
fn ios_categories() -> Value {
    json!({
        "6001": "Productivity",
        "6002": "Utilities",
        "6003": "Health & Fitness",
        "6004": "Photo & Video",
        "6005": "Social Networking",
        "6006": "Medical",
        "6007": "Music",
        "6008": "Navigation",
        "6009": "Reference",
        "6010": "News",
        "6011": "Weather",
        "6012": "Lifestyle",
        "6014": "Games",
        "6015": "Finance",
        "6016": "Travel",
        "6017": "Sports",
        "6018": "Business",
        "6020": "Entertainment",
        "6021": "Education",
        "6022": "Catalogs",
        "6023": "Food & Drink",
        "6024": "Shopping",
    })
}

/// Google Play category slug table.
fn android_categories() -> Value {
    json!({
        "business": "Business",
        "education": "Education",
        "entertainment": "Entertainment",
        "finance": "Finance",
        "food": "Food & Drink",
        "games": "Games",
        "health": "Health & Fitness",
        "lifestyle": "Lifestyle",
        "maps": "Maps & Navigation",
        "music": "Music & Audio",
        "news": "News & Magazines",
        "photography": "Photography",
        "productivity": "Productivity",
        "shopping": "Shopping",
        "social": "Social",
        "sports": "Sports",
        "travel": "Travel & Local",
        "utilities": "Tools",
        "weather": "Weather",
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
