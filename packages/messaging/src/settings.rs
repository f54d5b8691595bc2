//! Compile-time embedded Twilio settings.

use serde::Deserialize;

/// Messaging API settings loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioSettings {
    /// Human-readable provider name.
    pub name: String,
    /// API base URL (scheme and host, no trailing slash).
    pub base_url: String,
    /// API version path segment (e.g. `"2010-04-01"`).
    pub api_version: String,
}

const TWILIO_TOML: &str = include_str!("../settings/twilio.toml");

/// Returns the embedded Twilio settings.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed.
#[must_use]
pub fn twilio() -> TwilioSettings {
    toml::de::from_str(TWILIO_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse Twilio settings: {e}"))
}
