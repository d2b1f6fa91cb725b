// crates/storescope-catalog/src/networks.rs
// ============================================================================
// Module: Ad Network Vocabulary
// Description: Canonical ad network spellings and accepted aliases.
// Purpose: Keep remote-side network value sets in one revalidation point.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The remote ad intelligence endpoints are case-sensitive about network
//! names and accept different sets per endpoint family. Every canonical
//! spelling and accepted alias lives here so a change on the remote side is
//! a one-module update. The network-analysis family rejects Facebook
//! outright; the sponsor-search family additionally accepts Apple Search
//! Ads. Callers sending `facebook` are resolved to `Instagram`, the
//! substitution the remote API expects for ad intelligence queries.

// ============================================================================
// SECTION: Canonical Sets
// ============================================================================

/// Networks accepted by the creatives and network-analysis endpoints.
pub const ANALYSIS_NETWORKS: &[&str] = &[
    "Adcolony",
    "Admob",
    "Applovin",
    "Chartboost",
    "Instagram",
    "Mopub",
    "Pinterest",
    "Snapchat",
    "Supersonic",
    "Tapjoy",
    "TikTok",
    "Unity",
    "Vungle",
    "Youtube",
];

/// Networks accepted by the sponsor rank search endpoint.
pub const SPONSOR_NETWORKS: &[&str] = &[
    "Adcolony",
    "Admob",
    "Apple Search Ads",
    "Applovin",
    "Chartboost",
    "Instagram",
    "Mopub",
    "Pinterest",
    "Snapchat",
    "Supersonic",
    "Tapjoy",
    "TikTok",
    "Unity",
    "Vungle",
    "Youtube",
];

// ============================================================================
// SECTION: Aliases
// ============================================================================

/// Accepted spelling to canonical network value pairs.
///
/// Keys are matched case-insensitively by the validator. `google` and
/// `facebook` are the two substitutions the remote API does not document:
/// Google ad inventory is reported under Youtube, and Facebook ad
/// intelligence is reported under Instagram.
#[must_use]
pub const fn aliases() -> &'static [(&'static str, &'static str)] {
    &[
        ("adcolony", "Adcolony"),
        ("admob", "Admob"),
        ("apple search ads", "Apple Search Ads"),
        ("applovin", "Applovin"),
        ("chartboost", "Chartboost"),
        ("facebook", "Instagram"),
        ("google", "Youtube"),
        ("instagram", "Instagram"),
        ("mopub", "Mopub"),
        ("pinterest", "Pinterest"),
        ("snapchat", "Snapchat"),
        ("supersonic", "Supersonic"),
        ("tapjoy", "Tapjoy"),
        ("tiktok", "TikTok"),
        ("unity", "Unity"),
        ("vungle", "Vungle"),
        ("youtube", "Youtube"),
    ]
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::ANALYSIS_NETWORKS;
    use super::SPONSOR_NETWORKS;
    use super::aliases;

    #[test]
    fn every_alias_resolves_into_the_sponsor_set() {
        for (_, canonical) in aliases() {
            assert!(
                SPONSOR_NETWORKS.contains(canonical),
                "alias target {canonical} is not a canonical network"
            );
        }
    }

    #[test]
    fn analysis_set_excludes_apple_search_ads() {
        assert!(!ANALYSIS_NETWORKS.contains(&"Apple Search Ads"));
        assert!(SPONSOR_NETWORKS.contains(&"Apple Search Ads"));
    }

    #[test]
    fn facebook_resolves_to_instagram() {
        let target = aliases()
            .iter()
            .find(|(accepted, _)| *accepted == "facebook")
            .map(|(_, canonical)| *canonical);
        assert_eq!(target, Some("Instagram"));
    }
}
