// crates/storescope-catalog/src/market_analysis.rs
// ============================================================================
// Module: Market Analysis Tools
// Description: Descriptors for store-wide and category-wide operations.
// Purpose: Declare top chart, store summary, and sponsor intelligence contracts.
// Dependencies: storescope-catalog::{networks, params, reference}, storescope-core
// ============================================================================

//! ## Overview
//! Market analysis covers the aggregate views: top and trending apps,
//! publisher leaderboards, store summaries, category rankings, and the
//! sponsor (top advertiser/publisher) intelligence endpoints. The
//! comparison-attribute endpoints share one parameter vocabulary declared
//! here once.

// ============================================================================
// SECTION: Imports
// ============================================================================

use storescope_core::OutputHint;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::ToolDescriptor;

use crate::networks;
use crate::params;
use crate::reference;

// ============================================================================
// SECTION: Vocabulary
// ============================================================================

/// Comparison attributes accepted by the top-and-trending endpoints.
const COMPARISON_ATTRIBUTES: &[&str] = &["absolute", "delta", "transformed_delta"];

/// Time ranges accepted by the estimate comparison endpoints.
const ESTIMATE_TIME_RANGES: &[&str] = &["day", "week", "month", "quarter", "year"];

/// Time periods accepted by the sponsor intelligence endpoints.
const SPONSOR_PERIODS: &[&str] = &["week", "month", "quarter"];

/// Device type filters accepted by the iOS-aware endpoints.
const DEVICE_TYPES: &[&str] = &["iphone", "ipad", "total"];

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Descriptors for the market analysis tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        top_and_trending(),
        top_publishers(),
        usage_top_apps(),
        store_summary(),
        games_breakdown(),
        category_rankings(),
        sponsor_top_apps(),
        sponsor_rank_search(),
        top_creatives(),
    ]
}

/// Top apps by download and revenue estimates with growth metrics.
fn top_and_trending() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_top_and_trending",
        "Get top apps by download and revenue estimates with growth metrics.",
        "/v1/{os}/sales_report_estimates_comparison_attributes",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("comparison_attribute", ParamKind::Enum)
            .with_allowed(COMPARISON_ATTRIBUTES),
    )
    .with_param(
        ParamSpec::required("time_range", ParamKind::Enum).with_allowed(ESTIMATE_TIME_RANGES),
    )
    .with_param(ParamSpec::required("measure", ParamKind::Enum).with_allowed(&["units", "revenue"]))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::required("regions", ParamKind::CommaList))
    .with_param(ParamSpec::optional("device_type", ParamKind::Enum).with_allowed(DEVICE_TYPES))
    .with_param(params::date_optional("end_date"))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("25"))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer))
    .with_param(ParamSpec::optional("custom_fields_filter_id", ParamKind::String))
    .with_param(
        ParamSpec::optional("custom_tags_mode", ParamKind::Enum)
            .with_allowed(&["include_unified_apps", "exclude_unified_apps"])
            .with_default("include_unified_apps"),
    )
    .with_param(params::data_model())
}

/// Top publishers by download and revenue estimates with growth metrics.
fn top_publishers() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_top_publishers",
        "Get top publishers by download and revenue estimates with growth \
         metrics.",
        "/v1/{os}/top_and_trending/publishers",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("comparison_attribute", ParamKind::Enum)
            .with_allowed(COMPARISON_ATTRIBUTES),
    )
    .with_param(
        ParamSpec::required("time_range", ParamKind::Enum).with_allowed(ESTIMATE_TIME_RANGES),
    )
    .with_param(ParamSpec::required("measure", ParamKind::Enum).with_allowed(&["units", "revenue"]))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::optional("country", ParamKind::String))
    .with_param(ParamSpec::optional("device_type", ParamKind::Enum).with_allowed(DEVICE_TYPES))
    .with_param(params::date_optional("end_date"))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("25"))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer))
}

/// Top apps by active users with growth metrics.
fn usage_top_apps() -> ToolDescriptor {
    ToolDescriptor::remote(
        "usage_top_apps",
        "Get top apps by active users with growth metrics.",
        "/v1/{os}/top_and_trending/active_users",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("comparison_attribute", ParamKind::Enum)
            .with_allowed(COMPARISON_ATTRIBUTES),
    )
    .with_param(ParamSpec::required("time_range", ParamKind::Enum).with_allowed(SPONSOR_PERIODS))
    .with_param(
        ParamSpec::required("measure", ParamKind::Enum).with_allowed(&["DAU", "WAU", "MAU"]),
    )
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::required("regions", ParamKind::CommaList))
    .with_param(ParamSpec::optional("category", ParamKind::String).with_default("0"))
    .with_param(ParamSpec::optional("device_type", ParamKind::Enum).with_allowed(DEVICE_TYPES))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("25"))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer))
    .with_param(ParamSpec::optional("custom_fields_filter_id", ParamKind::String))
    .with_param(params::data_model())
}

/// Store-wide download and revenue summary statistics.
fn store_summary() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_store_summary",
        "Get app store summary statistics.",
        "/v1/{os}/store_summary",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("categories", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::report_granularity("daily"))
    .with_param(params::countries_default_us())
}

/// Aggregated download and revenue estimates for game categories.
fn games_breakdown() -> ToolDescriptor {
    ToolDescriptor::remote(
        "games_breakdown",
        "Retrieve aggregated download and revenue estimates of game \
         categories by country and date. Revenues are returned in cents.",
        "/v1/{os}/games_breakdown",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("categories", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::report_granularity("daily"))
    .with_param(ParamSpec::optional("countries", ParamKind::CommaList))
}

/// Top ranking apps for a category and chart type.
fn category_rankings() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_category_rankings",
        "Get top ranking apps of a particular category and chart type.",
        "/v1/{os}/ranking",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(
        ParamSpec::required("chart_type", ParamKind::Enum).with_allowed(reference::CHART_TYPES),
    )
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(params::date_required("date"))
}

/// Share of Voice for top advertisers or publishers.
///
/// The sponsor leaderboard accepts networks beyond the analysis set
/// (including `Facebook` and `All Networks`), so the network stays a free
/// string and the remote API validates it.
fn sponsor_top_apps() -> ToolDescriptor {
    ToolDescriptor::remote(
        "top_apps",
        "Fetch the current and prior Share of Voice for the top advertisers \
         or publishers over a given time period.",
        "/v1/{os}/ad_intel/top_apps",
        OutputHint::Object,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("role", ParamKind::Enum).with_allowed(&["advertisers", "publishers"]),
    )
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::required("period", ParamKind::Enum).with_allowed(SPONSOR_PERIODS))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(ParamSpec::required("network", ParamKind::String))
    .with_param(ParamSpec::optional("custom_fields_filter_id", ParamKind::String))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("25"))
    .with_param(ParamSpec::optional("page", ParamKind::Integer).with_default("1"))
}

/// Rank of one advertiser or publisher within the sponsor leaderboard.
fn sponsor_rank_search() -> ToolDescriptor {
    ToolDescriptor::remote(
        "top_apps_search",
        "Fetch the rank of a top advertiser or top publisher in apps \
         matching the provided filters.",
        "/v1/{os}/ad_intel/top_apps/search",
        OutputHint::Object,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(
        ParamSpec::required("role", ParamKind::Enum).with_allowed(&["advertisers", "publishers"]),
    )
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::required("period", ParamKind::Enum).with_allowed(SPONSOR_PERIODS))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(
        ParamSpec::required("network", ParamKind::Enum)
            .with_allowed(networks::SPONSOR_NETWORKS)
            .with_aliases(networks::aliases()),
    )
}

/// Top creatives over a time period with placement filters.
fn top_creatives() -> ToolDescriptor {
    ToolDescriptor::remote(
        "top_creatives",
        "Fetch the top creatives over a given time period.",
        "/v1/{os}/ad_intel/creatives/top",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(params::date_required("date"))
    .with_param(ParamSpec::required("period", ParamKind::Enum).with_allowed(SPONSOR_PERIODS))
    .with_param(ParamSpec::required("category", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
    .with_param(ParamSpec::required("network", ParamKind::String))
    .with_param(ParamSpec::required("ad_types", ParamKind::CommaList))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer).with_default("25"))
    .with_param(ParamSpec::optional("page", ParamKind::Integer).with_default("1"))
    .with_param(ParamSpec::optional("placements", ParamKind::CommaList))
    .with_param(ParamSpec::optional("video_durations", ParamKind::CommaList))
    .with_param(ParamSpec::optional("aspect_ratios", ParamKind::CommaList))
    .with_param(ParamSpec::optional("banner_dimensions", ParamKind::CommaList))
    .with_param(ParamSpec::optional("new_creative", ParamKind::Boolean).with_default("false"))
}
