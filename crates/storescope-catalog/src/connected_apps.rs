// crates/storescope-catalog/src/connected_apps.rs
// ============================================================================
// Module: Connected App Tools
// Description: Descriptors for first-party connected app reporting.
// Purpose: Declare sales report and store analytics contracts.
// Dependencies: storescope-catalog::params, storescope-core
// ============================================================================

//! ## Overview
//! Connected app tools report on apps the caller manages through their own
//! store accounts rather than on market estimates. The analytics and
//! traffic-source endpoints exist only for the iOS store; the unified sales
//! report additionally requires at least one app-identifier filter, which
//! the remote API enforces.

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

/// Descriptors for the connected app tool family.
pub(crate) fn descriptors() -> Vec<ToolDescriptor> {
    vec![analytics_metrics(), sources_metrics(), sales_reports(), unified_sales_reports()]
}

/// App Store analytics report for connected apps.
fn analytics_metrics() -> ToolDescriptor {
    ToolDescriptor::remote(
        "analytics_metrics",
        "Get detailed App Store analytics report for your connected apps, \
         including impressions, store views, sessions, and active devices.",
        "/v1/ios/sales_reports/analytics_metrics",
        OutputHint::ListOfObjects,
    )
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
}

/// App Store metrics broken down by traffic source type.
fn sources_metrics() -> ToolDescriptor {
    ToolDescriptor::remote(
        "sources_metrics",
        "Get App Store metrics by traffic source type for your connected \
         apps.",
        "/v1/ios/sales_reports/sources_metrics",
        OutputHint::ListOfObjects,
    )
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(ParamSpec::optional("limit", ParamKind::Integer))
    .with_param(ParamSpec::optional("offset", ParamKind::Integer))
}

/// Downloads and revenue sales report for connected apps.
fn sales_reports() -> ToolDescriptor {
    ToolDescriptor::remote(
        "sales_reports",
        "Get downloads and revenue sales report for your connected apps. \
         Revenue is net and returned in cents.",
        "/v1/{os}/sales_reports",
        OutputHint::ListOfObjects,
    )
    .with_param(params::os(params::MOBILE_PLATFORMS))
    .with_param(ParamSpec::required("app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::required("countries", ParamKind::CommaList))
    .with_param(params::report_granularity_required())
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
}

/// Unified cross-store sales report for connected apps.
fn unified_sales_reports() -> ToolDescriptor {
    ToolDescriptor::remote(
        "unified_sales_reports",
        "Get unified downloads and revenue sales report for your connected \
         apps. At least one app-identifier filter must be supplied.",
        "/v1/unified/sales_reports",
        OutputHint::ListOfObjects,
    )
    .with_param(params::date_required("start_date"))
    .with_param(params::date_required("end_date"))
    .with_param(params::report_granularity_required())
    .with_param(ParamSpec::optional("unified_app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("itunes_app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("android_app_ids", ParamKind::CommaList))
    .with_param(ParamSpec::optional("countries", ParamKind::CommaList))
}
