#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! SMS delivery for police alerts.
//!
//! Sends a text message through the Twilio Programmable Messaging API
//! and returns the provider-assigned message SID. Sending is **not**
//! idempotent: every successful call delivers a new message, and retrying
//! after an ambiguous failure may deliver a duplicate.
//!
//! # Environment Variables
//!
//! | Variable | Required | Description |
//! |---|---|---|
//! | `TWILIO_ACCOUNT_SID` | Yes | Account SID (also the basic-auth user) |
//! | `TWILIO_AUTH_TOKEN` | Yes | Auth token (basic-auth password) |
//! | `TWILIO_PHONE_NUMBER` | Yes | Sender number in E.164 form |
//! | `TWILIO_BASE_URL` | No | Overrides the embedded API base URL |
//!
//! The server reads these at startup and passes them in via
//! [`MessagingConfig`].

pub mod settings;
pub mod twilio;

use thiserror::Error;

pub use twilio::TwilioClient;

/// Errors from SMS delivery.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// One or more of the three credentials is missing. Raised before any
    /// network call.
    #[error("Twilio credentials are missing.")]
    MissingCredentials,

    /// The provider rejected the message or failed to send it.
    #[error("Failed to send SMS: {message}")]
    Delivery {
        /// Provider error text.
        message: String,
        /// Provider error code, when one was returned.
        code: Option<i64>,
    },

    /// HTTP request failed (connect, timeout, body read). The request URL
    /// is stripped since it carries the account SID.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Response body could not be parsed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

impl From<reqwest::Error> for MessagingError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

/// Account identifier, auth token, and sender number, all present.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    /// Account SID.
    pub account_sid: &'a str,
    /// Auth token.
    pub auth_token: &'a str,
    /// Sender phone number.
    pub from_number: &'a str,
}

/// Connection settings for the messaging provider.
#[derive(Clone)]
pub struct MessagingConfig {
    /// Account SID.
    pub account_sid: Option<String>,
    /// Auth token.
    pub auth_token: Option<String>,
    /// Sender phone number.
    pub from_number: Option<String>,
    /// API base URL (scheme and host).
    pub base_url: String,
    /// API version path segment.
    pub api_version: String,
}

impl std::fmt::Debug for MessagingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .field("from_number", &self.from_number)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl MessagingConfig {
    /// Builds a config from the embedded settings. Empty strings are
    /// treated as absent.
    #[must_use]
    pub fn new(
        account_sid: Option<String>,
        auth_token: Option<String>,
        from_number: Option<String>,
        base_url_override: Option<String>,
    ) -> Self {
        let defaults = settings::twilio();
        Self {
            account_sid: account_sid.filter(|s| !s.is_empty()),
            auth_token: auth_token.filter(|s| !s.is_empty()),
            from_number: from_number.filter(|s| !s.is_empty()),
            base_url: base_url_override
                .filter(|u| !u.is_empty())
                .unwrap_or(defaults.base_url),
            api_version: defaults.api_version,
        }
    }

    /// Returns all three credentials, or `None` if any is missing.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        Some(Credentials {
            account_sid: self.account_sid.as_deref()?,
            auth_token: self.auth_token.as_deref()?,
            from_number: self.from_number.as_deref()?,
        })
    }

    /// Whether all three credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }
}

/// Sends text messages.
#[async_trait::async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `body` to `to` and returns the provider's confirmation id.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError`] if credentials are missing, the request
    /// fails, or the provider rejects the message.
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, MessagingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(sid: &str, token: &str, from: &str) -> MessagingConfig {
        MessagingConfig::new(
            Some(sid.to_string()),
            Some(token.to_string()),
            Some(from.to_string()),
            None,
        )
    }

    #[test]
    fn requires_all_three_credentials() {
        assert!(config("AC1", "token", "+15550000000").is_configured());
        assert!(!config("", "token", "+15550000000").is_configured());
        assert!(!config("AC1", "", "+15550000000").is_configured());
        assert!(!config("AC1", "token", "").is_configured());
    }

    #[test]
    fn debug_redacts_auth_token() {
        let rendered = format!("{:?}", config("AC1", "s3cret", "+15550000000"));
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
