//! Google Places Nearby Search client.
//!
//! Sends `GET {base_url}?location={lat},{lng}&radius=5000&type=police&key=...`
//! and reads the `results` array. Each result may carry `name`,
//! `vicinity`, and `geometry.location`; anything missing stays `None`.
//! `next_page_token` is ignored.
//!
//! See <https://developers.google.com/maps/documentation/places/web-service/search-nearby>

use police_alert_models::{LatLng, PoliceStation};
use serde::Deserialize;

use crate::{PlacesConfig, PlacesError, PlacesLookup};

/// Provider statuses that mean the search itself succeeded.
const OK_STATUSES: &[&str] = &["OK", "ZERO_RESULTS"];

/// Places lookup backed by the Google Places API.
pub struct GooglePlacesClient {
    config: PlacesConfig,
    client: reqwest::Client,
}

impl GooglePlacesClient {
    /// Creates a client. `client` is shared with other adapters and should
    /// carry the request timeout.
    #[must_use]
    pub const fn new(config: PlacesConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Builds the Nearby Search request for `(latitude, longitude)`.
    fn build_request(
        &self,
        api_key: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<reqwest::Request, reqwest::Error> {
        let location = format!("{latitude},{longitude}");
        let radius = self.config.radius_meters.to_string();

        self.client
            .get(&self.config.base_url)
            .query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", self.config.place_type.as_str()),
                ("key", api_key),
            ])
            .build()
    }
}

#[derive(Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Deserialize)]
struct PlaceResult {
    name: Option<String>,
    vicinity: Option<String>,
    geometry: Option<Geometry>,
}

#[derive(Deserialize)]
struct Geometry {
    location: Option<LatLng>,
}

impl From<PlaceResult> for PoliceStation {
    fn from(place: PlaceResult) -> Self {
        Self {
            name: place.name,
            address: place.vicinity,
            location: place.geometry.and_then(|g| g.location),
        }
    }
}

#[async_trait::async_trait]
impl PlacesLookup for GooglePlacesClient {
    async fn nearby_police_stations(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<PoliceStation>, PlacesError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(PlacesError::MissingApiKey);
        };

        let req = self.build_request(api_key, latitude, longitude)?;
        let resp = self.client.execute(req).await?;

        let status = resp.status();
        let body = resp.text().await?;

        parse_response(status.as_u16(), &body)
    }
}

/// Parses a Nearby Search response body into stations.
fn parse_response(http_status: u16, body: &str) -> Result<Vec<PoliceStation>, PlacesError> {
    if !(200..300).contains(&http_status) {
        return Err(PlacesError::Upstream {
            http_status,
            provider_status: None,
            provider_message: None,
        });
    }

    let response: NearbySearchResponse =
        serde_json::from_str(body).map_err(|e| PlacesError::Parse {
            message: format!("Invalid Nearby Search response: {e}"),
        })?;

    if let Some(status) = response.status.as_deref()
        && !OK_STATUSES.contains(&status)
    {
        return Err(PlacesError::Upstream {
            http_status,
            provider_status: Some(status.to_string()),
            provider_message: response.error_message,
        });
    }

    Ok(response
        .results
        .into_iter()
        .map(PoliceStation::from)
        .collect())
}
