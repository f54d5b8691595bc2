//! Compile-time embedded Google Places settings.
//!
//! The endpoint and search constraints live in
//! `settings/google_places.toml` and are embedded at compile time. The
//! base URL may be overridden at runtime (see [`crate::PlacesConfig`]).

use serde::Deserialize;

/// Nearby-search settings loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacesSettings {
    /// Human-readable provider name.
    pub name: String,
    /// Nearby Search endpoint URL.
    pub base_url: String,
    /// Search radius around the caller, in meters.
    pub radius_meters: u32,
    /// Place category filter applied by the provider.
    pub place_type: String,
}

const GOOGLE_PLACES_TOML: &str = include_str!("../settings/google_places.toml");

/// Returns the embedded Google Places settings.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed (covered by tests since the
/// file is embedded).
#[must_use]
pub fn google_places() -> PlacesSettings {
    toml::de::from_str(GOOGLE_PLACES_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse Google Places settings: {e}"))
}
