#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Nearby police station lookup.
//!
//! Queries the Google Places Nearby Search API for places of type
//! `police` within a fixed radius of a coordinate and projects each result
//! into a [`PoliceStation`]. Only the first page of results is used.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `GOOGLE_API_KEY` | Yes | Places API key |
//! | `PLACES_BASE_URL` | No | Overrides the embedded Nearby Search URL |
//!
//! Variables are read by the server at startup and handed to
//! [`PlacesConfig`]; this crate never reads the environment itself.

pub mod google;
pub mod settings;

use police_alert_models::PoliceStation;
use thiserror::Error;

pub use google::GooglePlacesClient;

/// Errors from places lookups.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// No API key was configured. Raised before any network call.
    #[error("API key is missing.")]
    MissingApiKey,

    /// The provider answered with a failure status.
    #[error("Failed to fetch police stations.")]
    Upstream {
        /// HTTP status code of the response.
        http_status: u16,
        /// Provider-reported status (e.g. `REQUEST_DENIED`), if any.
        provider_status: Option<String>,
        /// Provider-reported `error_message`, if any.
        provider_message: Option<String>,
    },

    /// HTTP request failed (connect, timeout, body read). The request URL
    /// is stripped since it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Response body could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

impl From<reqwest::Error> for PlacesError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

/// Connection settings for the places provider.
#[derive(Clone)]
pub struct PlacesConfig {
    /// Provider API key. `None` makes every lookup fail with
    /// [`PlacesError::MissingApiKey`].
    pub api_key: Option<String>,
    /// Nearby Search endpoint URL.
    pub base_url: String,
    /// Search radius in meters.
    pub radius_meters: u32,
    /// Place category filter.
    pub place_type: String,
}

impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("radius_meters", &self.radius_meters)
            .field("place_type", &self.place_type)
            .finish()
    }
}

impl PlacesConfig {
    /// Builds a config from the embedded settings, with an optional base
    /// URL override.
    ///
    /// Empty strings are treated as absent.
    #[must_use]
    pub fn new(api_key: Option<String>, base_url_override: Option<String>) -> Self {
        let defaults = settings::google_places();
        Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            base_url: base_url_override
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.base_url),
            radius_meters: defaults.radius_meters,
            place_type: defaults.place_type,
        }
    }

    /// Whether an API key is present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Looks up police stations near a coordinate.
#[async_trait::async_trait]
pub trait PlacesLookup: Send + Sync {
    /// Returns the stations near `(latitude, longitude)`, in provider order.
    /// An empty list is a successful lookup.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the key is missing, the request fails, or
    /// the provider reports a failure.
    async fn nearby_police_stations(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<PoliceStation>, PlacesError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_absent() {
        let config = PlacesConfig::new(Some(String::new()), None);
        assert!(!config.is_configured());
        assert_eq!(config.base_url, settings::google_places().base_url);
    }

    #[test]
    fn base_url_override_applies() {
        let config = PlacesConfig::new(
            Some("key".to_string()),
            Some("http://localhost:9000".to_string()),
        );
        assert!(config.is_configured());
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.radius_meters, 5000);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = PlacesConfig::new(Some("s3cret".to_string()), None);
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
