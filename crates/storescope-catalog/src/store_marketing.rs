// crates/storescope-catalog/src/store_marketing.rs
// ============================================================================
// Module: Store Marketing Tools
// Description: Descriptors for featuring, keyword, and review operations.
// Purpose: Declare App Store featuring and store listing intelligence contracts.
// Dependencies: storescope-catalog::params, storescope-core
// ============================================================================

//! ## Overview
//! Store marketing covers App Store featuring (today stories, featured apps
//! and creatives), keyword rankings and research, and app reviews. The
//! featuring endpoints for stories and apps exist only for the iOS store,
//! so they carry no platform segment.

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

/// Descriptors for the store marketing tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        featured_today_stories(),
        featured_apps(),
        featured_creatives(),
        keywords(),
        research_keyword(),
        reviews(),
    ]
}

/// Featured-today story metadata from the App Store.
fn featured_today_stories() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_featured_today_stories",
        "Retrieve featured today story metadata from the App Store.",
        "/v1/ios/featured/today/stories",
        OutputHint::ListOfObjects,
    )
    .with_param(params::country_default_us())
    .with_param(params::date_optional("start_date"))
    .with_param(params::date_optional("end_date"))
}

/// Apps featured on the App Store Apps and Games pages.
fn featured_apps() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_featured_apps",
        "Retrieve apps featured on the App Store's Apps & Games pages.",
        "/v1/ios/featured/apps",
        OutputHint::Object,
    )
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(params::country_default_us())
    .with_param(params::date_optional("start_date"))
    .with_param(params::date_optional("end_date"))
}

/// Featured creatives and their store positions over time.
fn featured_creatives() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_featured_creatives",
        "Retrieve the featured creatives and their positions within the App \
         and Google Play store over time.",
        "/v1/{os}/featured/creatives",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(ParamSpec::optional("countries", ParamKind::CommaList))
    .with_param(ParamSpec::optional("types", ParamKind::CommaList))
    .with_param(params::date_optional("start_date"))
    .with_param(params::date_optional("end_date"))
}

/// Current keyword rankings for one app.
fn keywords() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_keywords",
        "Get keyword rankings for apps.",
        "/v1/{os}/keywords/get_current_keywords",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(params::country_default_us())
}

/// Keyword traffic, difficulty, and related term research.
fn research_keyword() -> ToolDescriptor {
    ToolDescriptor::remote(
        "research_keyword",
        "Retrieve detailed information for any keyword, such as related \
         search terms, traffic data, and ranking difficulty.",
        "/v1/{os}/keywords/research_keyword",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("term", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(ParamSpec::optional("app_id", ParamKind::Integer))
    .with_param(ParamSpec::optional("page", ParamKind::Integer))
}

/// App reviews and ratings with content filters.
fn reviews() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_reviews",
        "Get app reviews and ratings data.",
        "/v1/{os}/review/get_reviews",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(params::date_optional("start_date"))
    .with_param(params::date_optional("end_date"))
    .with_param(ParamSpec::optional("rating_filter", ParamKind::String))
    .with_param(ParamSpec::optional("search_term", ParamKind::String))
    .with_param(ParamSpec::optional("username", ParamKind::String))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer))
    .with_param(ParamSpec::optional("page", ParamKind::Integer))
}
