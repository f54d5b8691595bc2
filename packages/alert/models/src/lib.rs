#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the police alert API.
//!
//! These types are serialized to JSON for the `/send-alert` endpoint and
//! shared by the places and messaging adapters. None of them outlive a
//! single request.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status string returned when both provider calls succeed.
pub const ALERT_SENT_STATUS: &str = "Alert sent successfully via SMS";

/// E.164 recipient: `+`, a non-zero country code digit, 2-15 digits total.
static E164_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{1,14}$").expect("valid regex"));

/// A latitude/longitude pair (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Incoming alert request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAlertRequest {
    /// Latitude of the caller, in `[-90, 90]`.
    pub latitude: f64,
    /// Longitude of the caller, in `[-180, 180]`.
    pub longitude: f64,
    /// Recipient of the SMS alert in E.164 form (e.g. `+15551234567`).
    pub phone_number: String,
}

/// Reasons an [`LocationAlertRequest`] is rejected before any provider call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude must be between -90 and 90")]
    Latitude,

    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude must be between -180 and 180")]
    Longitude,

    /// Phone number is not in E.164 form.
    #[error("phone_number must be in E.164 format (e.g. +15551234567)")]
    PhoneNumber,
}

impl LocationAlertRequest {
    /// Checks coordinate ranges and the phone number shape.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ValidationError::Latitude);
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ValidationError::Longitude);
        }
        if !E164_RE.is_match(&self.phone_number) {
            return Err(ValidationError::PhoneNumber);
        }
        Ok(())
    }

    /// Returns the phone number with everything but the last four digits
    /// masked, for log output.
    #[must_use]
    pub fn masked_phone_number(&self) -> String {
        mask_phone_number(&self.phone_number)
    }
}

/// Masks all but the last four characters of a phone number.
#[must_use]
pub fn mask_phone_number(phone_number: &str) -> String {
    let count = phone_number.chars().count();
    let visible = count.min(4);
    let tail: String = phone_number.chars().skip(count - visible).collect();
    format!("{}{tail}", "*".repeat(count - visible))
}

/// A nearby police station projected from a places search result.
///
/// Fields the provider did not return stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliceStation {
    /// Station name.
    pub name: Option<String>,
    /// Short street address (the provider's `vicinity`).
    pub address: Option<String>,
    /// Station coordinates.
    pub location: Option<LatLng>,
}

/// Successful response from `POST /send-alert`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertResult {
    /// Every station the lookup returned, not only the ones in the SMS.
    pub police_stations: Vec<PoliceStation>,
    /// Identifier the messaging provider assigned to the sent SMS.
    #[serde(rename = "sms_sid", alias = "message_confirmation_id")]
    pub message_confirmation_id: String,
    /// Human-readable status, [`ALERT_SENT_STATUS`] on success.
    pub status: String,
}

/// Error body returned for any failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Description of the failure.
    pub detail: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Always `true` when the server is answering.
    pub healthy: bool,
    /// Server crate version.
    pub version: String,
}
