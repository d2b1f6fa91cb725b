// crates/storescope-catalog/src/params.rs
// ============================================================================
// Module: Shared Parameter Builders
// Description: Parameter specifications reused across the tool catalog.
// Purpose: Keep platform, date, and granularity contracts consistent.
// Dependencies: storescope-core
// ============================================================================

//! ## Overview
//! Most catalog tools share the same handful of parameter shapes: a
//! path-bound platform segment, `YYYY-MM-DD` date bounds, a reporting
//! granularity, and the estimate data model selector. Declaring them here
//! keeps the per-tool modules down to what is actually tool-specific and
//! guarantees that, for example, every `daily` spelling resolves to the same
//! wire value everywhere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use storescope_core::ParamKind;
use storescope_core::ParamSpec;

// ============================================================================
// SECTION: Platform Sets
// ============================================================================

/// Platforms accepted by store-specific endpoints.
pub const MOBILE_PLATFORMS: &[&str] = &["ios", "android"];

/// Platforms accepted by endpoints that also aggregate across stores.
pub const ALL_PLATFORMS: &[&str] = &["ios", "android", "unified"];

/// Platforms accepted by the entity search endpoint.
pub const SEARCH_PLATFORMS: &[&str] = &["ios", "android", "both_stores", "unified"];

// ============================================================================
// SECTION: Granularity Vocabulary
// ============================================================================

/// Reporting granularities accepted by the estimate endpoints.
pub const REPORT_GRANULARITIES: &[&str] = &["daily", "weekly", "monthly", "quarterly"];

/// Short period forms expected by the ad intelligence and usage endpoints.
pub const PERIOD_GRANULARITIES: &[&str] = &["day", "week", "month"];

/// Accepted spelling to short period form pairs.
const PERIOD_ALIASES: &[(&str, &str)] = &[("daily", "day"), ("weekly", "week"), ("monthly", "month")];

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Required path-bound platform parameter restricted to the given set.
#[must_use]
pub fn os(allowed: &[&str]) -> ParamSpec {
    ParamSpec::required("os", ParamKind::Enum).with_allowed(allowed).bound_to_path()
}

/// Required `YYYY-MM-DD` date parameter.
#[must_use]
pub fn date_required(name: &str) -> ParamSpec {
    ParamSpec::required(name, ParamKind::Date)
}

/// Optional `YYYY-MM-DD` date parameter.
#[must_use]
pub fn date_optional(name: &str) -> ParamSpec {
    ParamSpec::optional(name, ParamKind::Date)
}

/// Optional reporting granularity (`daily` through `quarterly`).
#[must_use]
pub fn report_granularity(default: &str) -> ParamSpec {
    ParamSpec::optional("date_granularity", ParamKind::Enum)
        .with_allowed(REPORT_GRANULARITIES)
        .with_default(default)
}

/// Required reporting granularity (`daily` through `quarterly`).
#[must_use]
pub fn report_granularity_required() -> ParamSpec {
    ParamSpec::required("date_granularity", ParamKind::Enum).with_allowed(REPORT_GRANULARITIES)
}

/// Optional granularity resolved to the short period form the endpoint
/// expects, sent under the given wire name.
///
/// Accepts both the short forms and the `daily`/`weekly`/`monthly`
/// spellings used by the reporting endpoints.
#[must_use]
pub fn period_granularity(wire_name: &str, default: &str) -> ParamSpec {
    ParamSpec::optional("date_granularity", ParamKind::Enum)
        .with_allowed(PERIOD_GRANULARITIES)
        .with_aliases(PERIOD_ALIASES)
        .with_default(default)
        .on_wire(wire_name)
}

/// Optional estimate data model selector.
#[must_use]
pub fn data_model() -> ParamSpec {
    ParamSpec::optional("data_model", ParamKind::Enum)
        .with_allowed(&["DM_2025_Q2", "DM_2025_Q1"])
        .with_default("DM_2025_Q2")
}

/// Optional single country code defaulting to `US`.
#[must_use]
pub fn country_default_us() -> ParamSpec {
    ParamSpec::optional("country", ParamKind::String).with_default("US")
}

/// Optional comma-separated country list defaulting to `US`.
#[must_use]
pub fn countries_default_us() -> ParamSpec {
    ParamSpec::optional("countries", ParamKind::CommaList).with_default("US")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
