#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Police alert orchestration.
//!
//! Validates a [`LocationAlertRequest`], looks up nearby police stations,
//! composes an SMS listing the first three, and sends it to the requested
//! phone number. The steps run strictly in order: a failed lookup means no
//! SMS is sent, and there is no partial-success result.

pub mod message;

use police_alert_messaging::{MessageSender, MessagingError};
use police_alert_models::{ALERT_SENT_STATUS, AlertResult, LocationAlertRequest, ValidationError};
use police_alert_places::{PlacesError, PlacesLookup};
use thiserror::Error;

pub use message::compose_alert_message;

/// Fixed description for any failed station lookup.
const LOOKUP_FAILED: &str = "Failed to fetch police stations.";

/// Why an alert could not be sent.
///
/// The `Display` text of each variant is what the caller sees as the
/// error `detail`.
#[derive(Debug, Error)]
pub enum AlertError {
    /// A required provider credential is not configured.
    #[error("{message}")]
    Configuration {
        /// Description naming the missing credential.
        message: String,
    },

    /// The places provider failed or returned an unusable response.
    #[error("{message}")]
    Upstream {
        /// Description of the lookup failure.
        message: String,
    },

    /// The messaging provider rejected or failed to send the SMS.
    #[error("{message}")]
    Delivery {
        /// Description including the provider's error text.
        message: String,
    },

    /// The request payload is malformed.
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

impl From<PlacesError> for AlertError {
    fn from(value: PlacesError) -> Self {
        match value {
            PlacesError::MissingApiKey => Self::Configuration {
                message: value.to_string(),
            },
            PlacesError::Upstream { .. } => Self::Upstream {
                message: value.to_string(),
            },
            PlacesError::Http(_) | PlacesError::Parse { .. } => Self::Upstream {
                message: LOOKUP_FAILED.to_string(),
            },
        }
    }
}

impl From<MessagingError> for AlertError {
    fn from(value: MessagingError) -> Self {
        match value {
            MessagingError::MissingCredentials => Self::Configuration {
                message: value.to_string(),
            },
            MessagingError::Delivery { .. } => Self::Delivery {
                message: value.to_string(),
            },
            MessagingError::Http(_) | MessagingError::Parse { .. } => Self::Delivery {
                message: format!("Failed to send SMS: {value}"),
            },
        }
    }
}

/// Describes a lookup failure for the log, including the provider's status
/// details that the caller-facing message leaves out.
fn lookup_failure_summary(err: &PlacesError) -> String {
    match err {
        PlacesError::Upstream {
            http_status,
            provider_status,
            provider_message,
        } => format!(
            "HTTP {http_status}, provider status {} ({})",
            provider_status.as_deref().unwrap_or("none"),
            provider_message.as_deref().unwrap_or("no message"),
        ),
        PlacesError::MissingApiKey | PlacesError::Http(_) | PlacesError::Parse { .. } => {
            err.to_string()
        }
    }
}

/// Describes a delivery failure for the log. Provider rejection text can
/// quote the recipient's number, so only the provider code is kept.
fn delivery_failure_summary(err: &MessagingError) -> String {
    match err {
        MessagingError::Delivery { code, .. } => format!(
            "rejected by provider (code {})",
            code.map_or_else(|| "none".to_string(), |c| c.to_string())
        ),
        MessagingError::MissingCredentials
        | MessagingError::Http(_)
        | MessagingError::Parse { .. } => err.to_string(),
    }
}

/// Looks up police stations near the request's coordinates and sends them
/// to the request's phone number by SMS.
///
/// The SMS lists at most the first three stations; the returned
/// [`AlertResult`] carries all of them.
///
/// # Errors
///
/// * [`AlertError::Validation`] if the request is malformed (no provider
///   is called)
/// * [`AlertError::Configuration`] if a provider credential is missing
/// * [`AlertError::Upstream`] if the lookup fails (no SMS is sent)
/// * [`AlertError::Delivery`] if the SMS could not be sent
pub async fn send_alert(
    places: &dyn PlacesLookup,
    sender: &dyn MessageSender,
    request: &LocationAlertRequest,
) -> Result<AlertResult, AlertError> {
    request.validate()?;

    let alert_id = uuid::Uuid::new_v4();
    let masked_phone = request.masked_phone_number();
    log::info!(
        "[{alert_id}] Alert requested at ({}, {}) for {masked_phone}",
        request.latitude,
        request.longitude,
    );

    let police_stations = places
        .nearby_police_stations(request.latitude, request.longitude)
        .await
        .inspect_err(|e| {
            log::warn!(
                "[{alert_id}] Station lookup failed: {}",
                lookup_failure_summary(e)
            );
        })?;

    log::debug!(
        "[{alert_id}] Found {} nearby police station(s)",
        police_stations.len()
    );

    let body = compose_alert_message(&police_stations);

    let message_confirmation_id = sender
        .send_sms(&request.phone_number, &body)
        .await
        .inspect_err(|e| {
            log::warn!(
                "[{alert_id}] SMS to {masked_phone} failed: {}",
                delivery_failure_summary(e)
            );
        })?;

    log::info!("[{alert_id}] Alert sent as {message_confirmation_id}");

    Ok(AlertResult {
        police_stations,
        message_confirmation_id,
        status: ALERT_SENT_STATUS.to_string(),
    })
}
