// crates/storescope-catalog/src/app_analysis.rs
// ============================================================================
// Module: App Analysis Tools
// Description: Descriptors for per-app intelligence operations.
// Purpose: Declare metadata, estimate, usage, and ad intelligence contracts.
// Dependencies: storescope-catalog::{networks, params}, storescope-core
// ============================================================================

//! ## Overview
//! App analysis covers the per-app read operations: store metadata, download
//! and revenue estimates, category rankings, usage intelligence, and the ad
//! intelligence creative/impression views. Each descriptor records the
//! remote path template, the accepted parameters, and the expected payload
//! shape so the dispatcher can serve every one of them through the same
//! validation and normalization pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use storescope_core::OutputHint;
use storescope_core::ParamKind;
use storescope_core::ParamSpec;
use storescope_core::ToolDescriptor;

use crate::networks;
use crate::params;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum app identifiers accepted by the metadata and purchase endpoints.
const MAX_METADATA_APP_IDS: usize = 100;

/// Maximum app identifiers accepted by the network-analysis endpoint.
const MAX_NETWORK_ANALYSIS_APP_IDS: usize = 5;

/// Maximum app identifiers accepted by the usage intelligence endpoints.
const MAX_USAGE_APP_IDS: usize = 500;

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Descriptors for the app analysis tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![
        app_metadata(),
        top_in_app_purchases(),
        version_history(),
        app_update_timeline(),
        download_estimates(),
        revenue_estimates(),
        compact_sales_report_estimates(),
        category_ranking_summary(),
        category_history(),
        usage_active_users(),
        retention(),
        demographics(),
        downloads_by_sources(),
        creatives(),
        impressions(),
        impressions_rank(),
    ]
}

/// Store metadata for up to 100 apps.
fn app_metadata() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_app_metadata",
        "Get app metadata such as name, publisher, categories, description, \
         screenshots, and ratings.",
        "/v1/{os}/apps",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(
        ParamSpec::required("app_ids", ParamKind::CommaList).with_max_items(MAX_METADATA_APP_IDS),
    )
    .with_param(params::country_default_us())
    .with_param(ParamSpec::optional("include_sdk_data", ParamKind::Boolean).with_default("false"))
}

/// Top in-app purchases for the requested apps.
fn top_in_app_purchases() -> ToolDescriptor {
    ToolDescriptor::remote(
        "top_in_app_purchases",
        "Retrieve top in-app purchases for the requested app IDs.",
        "/v1/{os}/apps/top_in_app_purchases",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(
        ParamSpec::required("app_ids", ParamKind::CommaList).with_max_items(MAX_METADATA_APP_IDS),
    )
    .with_param(params::country_default_us())
}

/// Version history for a single app.
fn version_history() -> ToolDescriptor {
    ToolDescriptor::remote(
        "version_history",
        "Get version history for a particular app.",
        "/v1/{os}/apps/version_history",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(params::country_default_us())
}

/// Update timeline for a single app.
fn app_update_timeline() -> ToolDescriptor {
    ToolDescriptor::remote(
        "app_update_timeline",
        "Get app update history timeline.",
        "/v1/{os}/app_update/get_app_update_history",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(params::country_default_us())
    .with_param(ParamSpec::optional("date_limit", ParamKind::Integer).with_default("10"))
}

/// Download estimates by country and date.
fn download_estimates() -> ToolDescriptor {
    sales_report_estimates(
        "get_download_estimates",
        "Fetch download estimates for apps by country and date.",
    )
}

/// Revenue estimates by country and date. Revenues are reported in cents.
fn revenue_estimates() -> ToolDescriptor {
    sales_report_estimates(
        "get_revenue_estimates",
        "Fetch revenue estimates for apps by country and date. Revenues are \
         returned in cents.",
    )
}

/// Shared shape of the two sales-report estimate tools.
fn sales_report_estimates(name: &str, description: &str) -> ToolDescriptor {
    ToolDescriptor::remote(
        name,
        description,
        "/v1/{os}/sales_report_estimates",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(ParamSpec::optional("countries", ParamKind::CommaList))
    .with_param(params::report_granularity("daily"))
    .with_param(params::data_model())
}

/// Compact download and revenue estimates with app, publisher, and category
/// filters.
fn compact_sales_report_estimates() -> ToolDescriptor {
    ToolDescriptor::remote(
        "compact_sales_report_estimates",
        "Get download and revenue estimates in compact format. Revenues are \
         returned in cents.",
        "/v1/{os}/compact_sales_report_estimates",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(ParamSpec::optional("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("publisher_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("unified_app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("unified_publisher_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("categories", ParamKind::CommaList))
    .with_param(params::countries_default_us())
    .with_param(params::report_granularity("daily"))
    .with_param(params::data_model())
}

/// Today's category ranking summary for one app.
fn category_ranking_summary() -> ToolDescriptor {
    ToolDescriptor::remote(
        "category_ranking_summary",
        "Get today's category ranking summary for a particular app.",
        "/v1/{os}/category/category_ranking_summary",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_id", ParamKind::String))
    .with_param(ParamSpec::required("country", ParamKind::String))
}

/// Category ranking history for apps.
fn category_history() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_category_history",
        "Get category ranking history for apps.",
        "/v1/{os}/category/category_history",
        OutputHint::Object,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::required("categories", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::countries_default_us())
}

/// Usage intelligence active user counts.
fn usage_active_users() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_usage_active_users",
        "Get usage intelligence active users data.",
        "/v1/{os}/usage/active_users",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("app_ids", ParamKind::CommaList).with_max_items(MAX_USAGE_APP_IDS),
    )
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::countries_default_us())
    .with_param(params::period_granularity("time_period", "month"))
    .with_param(params::data_model())
}

/// Retention curves from day 1 to day 90.
fn retention() -> ToolDescriptor {
    usage_analysis(
        "app_analysis_retention",
        "Get retention analysis data for apps, from day 1 to day 90 along \
         with baseline retention.",
        "/v1/{os}/usage/retention",
    )
}

/// Demographic breakdown by gender and age range.
fn demographics() -> ToolDescriptor {
    usage_analysis(
        "app_analysis_demographics",
        "Get demographic analysis data for apps, broken down by gender and \
         age range.",
        "/v1/{os}/usage/demographics",
    )
}

/// Shared shape of the retention and demographics tools.
fn usage_analysis(name: &str, description: &str, path: &str) -> ToolDescriptor {
    ToolDescriptor::remote(name, description, path, OutputHint::Object)
        .with_param(params::os(params::ALL_PLATFORMS))
        .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
        .with_param(params::report_granularity_required())
        .with_param(params::date_required("start_date"))
        .with_param(params::date_optional("end_date").with_default("2024-01-31"))
        .with_param(ParamSpec::optional("country", ParamKind::String))
}

/// Downloads attributed to organic, paid, and browser sources.
///
/// The remote endpoint filters by platform but always expects unified app
/// identifiers.
fn downloads_by_sources() -> ToolDescriptor {
    ToolDescriptor::remote(
        "downloads_by_sources",
        "Get app downloads by sources (organic, paid, browser). Expects \
         unified app IDs regardless of the platform filter.",
        "/v1/{os}/downloads_by_sources",
        OutputHint::Object,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::report_granularity("monthly"))
}

/// Advertising creatives with share-of-voice and publisher data.
fn creatives() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_creatives",
        "Fetch advertising creatives for apps with Share of Voice and \
         publisher data.",
        "/v1/{os}/ad_intel/creatives",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(
        ParamSpec::required("networks", ParamKind::CommaList)
            .with_allowed(networks::ANALYSIS_NETWORKS)
            .with_aliases(networks::aliases()),
    )
    .with_param(ParamSpec::required("ad_types", ParamKind::CommaList))
    .with_param(params::date_optional("end_date"))
}

/// Advertising impression share over time.
fn impressions() -> ToolDescriptor {
    ToolDescriptor::remote(
        "get_impressions",
        "Get advertising impressions data for apps.",
        "/v1/{os}/ad_intel/network_analysis",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(
        ParamSpec::required("app_ids", ParamKind::CommaList)
            .with_max_items(MAX_NETWORK_ANALYSIS_APP_IDS),
    )
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(
        ParamSpec::required("networks", ParamKind::CommaList)
            .with_allowed(networks::ANALYSIS_NETWORKS)
            .with_aliases(networks::aliases()),
    )
    .with_param(params::period_granularity("period", "day"))
}

/// Advertising impression rank across the broader network set.
fn impressions_rank() -> ToolDescriptor {
    ToolDescriptor::remote(
        "impressions_rank",
        "Get advertising impressions rank data for apps.",
        "/v1/{os}/ad_intel/network_analysis/rank",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::ALL_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(ParamSpec::optional("networks", ParamKind::CommaList))
    .with_param(params::period_granularity("period", "day"))
}
