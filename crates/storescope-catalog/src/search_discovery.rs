// crates/storescope-catalog/src/search_discovery.rs
// ============================================================================
// Module: Search and Discovery Tools
// Description: Descriptors for entity search and publisher discovery.
// Purpose: Declare search, publisher, and category discovery contracts.
// Dependencies: storescope-catalog::params, storescope-core
// ============================================================================

//! ## Overview
//! Search and discovery covers free-text entity search, publisher app
//! listings (platform-specific and unified), and bulk app-identifier
//! discovery by category. The entity search endpoint is the one place the
//! catalog accepts the `both_stores` platform value.

// ============================================================================
// SECTION: Imports
// ============================================================================

use storescope_core::OutputHint;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::ToolDescriptor;

use crate::params;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Descriptors for the search and discovery tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![search_entities(), publisher_apps(), unified_publisher_apps(), app_ids_by_category()]
}

/// Free-text search for apps and publishers.
fn search_entities() -> ToolDescriptor {
    ToolDescriptor::remote(
        "search_entities",
        "Search for apps and publishers by name, description, or other \
         metadata.",
        "/v1/{os}/search_entities",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::SEARCH_PLATFORMS))
    .with_param(
        ParamSpec::required("entity_type", ParamKind::Enum).with_allowed(&["app", "publisher"]),
    )
    .with_param(ParamSpec::required("term", ParamKind::String))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("100"))
}

/// Apps belonging to one publisher, with pagination.
fn publisher_apps() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_publisher_apps",
        "Retrieve a collection of apps for the specified publisher.",
        "/v1/{os}/publisher/publisher_apps",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("publisher_id", ParamKind::String))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("20"))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer).with_default("0"))
    .with_param(ParamSpec::optional("include_count", ParamKind::Boolean).with_default("false"))
}

/// Unified publisher with its unified and platform-specific apps.
fn unified_publisher_apps() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_unified_publisher_apps",
        "Retrieve a unified publisher and all of its unified apps together \
         with platform-specific apps.",
        "/v1/unified/publishers/apps",
        OutputHint::Object,
    )
    .with_param(ParamSpec::required("unified_id", ParamKind::String))
}

/// App identifiers released or updated in a category window.
fn app_ids_by_category() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_app_ids_by_category",
        "Retrieve a list of app IDs from a given release or updated date in \
         a particular category.",
        "/v1/{os}/apps/app_ids",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(params::date_optional("start_date"))
    .with_param(params::date_optional("updated_date"))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("1000"))
}
