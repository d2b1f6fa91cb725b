// crates/storescope-catalog/src/lib.rs
// ============================================================================
// Module: Storescope Catalog
// Description: Complete tool catalog for the analytics gateway.
// Purpose: Declare every tool descriptor and generate listing schemas.
// Dependencies: storescope-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The catalog declares every analytics operation the gateway exposes: the
//! per-app analysis family, store marketing, market analysis, connected-app
//! reporting, search and discovery, and the local reference lookups. Each
//! family module contributes descriptors; [`descriptors`] concatenates them
//! and [`registry`] builds the immutable registry the dispatcher reads.
//! Remote-side vocabularies that were discovered rather than documented (ad
//! network spellings in particular) are centralized in [`networks`] so they
//! can be revalidated in one place.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod app_analysis;
mod connected_apps;
mod market_analysis;
pub mod networks;
pub mod params;
pub mod reference;
mod schema;
mod search_discovery;
mod store_marketing;


// ============================================================================
// SECTION: Imports
// ============================================================================

use storescope_core::RegistryError;
use storescope_core::ToolDescriptor;
use storescope_core::ToolRegistry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use schema::ToolDefinition;
pub use schema::input_schema;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Returns every tool descriptor in the catalog.
///
/// The order is intentional: family by family, matching the documented tool
/// groupings. Append new tools at the end of their family module.
#[must_use]
pub fn descriptors() -> Vec<ToolDescriptor> {
    let mut all = Vec::new();
    all.extend(app_analysis::descriptors());
    all.extend(store_marketing::descriptors());
    all.extend(market_analysis::descriptors());
    all.extend(connected_apps::descriptors());
    all.extend(search_discovery::descriptors());
    all.extend(reference::descriptors());
    all
}

/// Builds the tool registry from the full catalog.
///
/// # Errors
///
/// Returns [`RegistryError`] when the catalog is internally inconsistent;
/// this is a fatal startup condition, never a per-request one.
pub fn registry() -> Result<ToolRegistry, RegistryError> {
    ToolRegistry::build(descriptors())
}

/// Builds the listing definitions for every registered tool, in name order.
#[must_use]
pub fn tool_definitions(registry: &ToolRegistry) -> Vec<ToolDefinition> {
    registry.iter().map(ToolDefinition::from_descriptor).collect()
}
