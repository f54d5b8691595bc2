//! Process configuration, read once at startup.
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `BIND_ADDR` | `127.0.0.1` | Address to bind |
//! | `PORT` | `8080` | Port to bind |
//! | `HTTP_TIMEOUT_SECS` | `5` | Timeout for each outbound provider call |
//! | `GOOGLE_API_KEY` | none | Places API key |
//! | `PLACES_BASE_URL` | embedded | Nearby Search URL override |
//! | `TWILIO_ACCOUNT_SID` | none | Messaging account SID |
//! | `TWILIO_AUTH_TOKEN` | none | Messaging auth token |
//! | `TWILIO_PHONE_NUMBER` | none | Sender number |
//! | `TWILIO_BASE_URL` | embedded | Messaging API base URL override |
//!
//! Missing credentials do not stop the server; every alert request then
//! fails with a configuration error.

use std::time::Duration;

use police_alert_messaging::MessagingConfig;
use police_alert_places::PlacesConfig;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// Server and provider configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Timeout applied to each outbound provider request.
    pub http_timeout: Duration,
    /// Places provider settings.
    pub places: PlacesConfig,
    /// Messaging provider settings.
    pub messaging: MessagingConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Unparseable `PORT` or `HTTP_TIMEOUT_SECS` values fall back to their
    /// defaults with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = parse_or_default(&lookup, "PORT", DEFAULT_PORT);
        let timeout_secs = parse_or_default(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS);

        Self {
            bind_addr,
            port,
            http_timeout: Duration::from_secs(timeout_secs),
            places: PlacesConfig::new(lookup("GOOGLE_API_KEY"), lookup("PLACES_BASE_URL")),
            messaging: MessagingConfig::new(
                lookup("TWILIO_ACCOUNT_SID"),
                lookup("TWILIO_AUTH_TOKEN"),
                lookup("TWILIO_PHONE_NUMBER"),
                lookup("TWILIO_BASE_URL"),
            ),
        }
    }

    /// Logs a warning for each provider that is missing credentials.
    pub fn warn_missing_credentials(&self) {
        if !self.places.is_configured() {
            log::warn!("GOOGLE_API_KEY is not set; every alert will fail until it is");
        }
        if !self.messaging.is_configured() {
            log::warn!(
                "Twilio credentials are incomplete (need TWILIO_ACCOUNT_SID, \
                 TWILIO_AUTH_TOKEN, TWILIO_PHONE_NUMBER); every alert will fail until they are set"
            );
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {name}={raw:?}; using {default}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert!(!config.places.is_configured());
        assert!(!config.messaging.is_configured());
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "9000"),
            ("HTTP_TIMEOUT_SECS", "3"),
            ("GOOGLE_API_KEY", "gkey"),
            ("PLACES_BASE_URL", "http://places.local/nearby"),
            ("TWILIO_ACCOUNT_SID", "AC1"),
            ("TWILIO_AUTH_TOKEN", "token"),
            ("TWILIO_PHONE_NUMBER", "+15550000000"),
            ("TWILIO_BASE_URL", "http://twilio.local"),
        ]);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.places.api_key.as_deref(), Some("gkey"));
        assert_eq!(config.places.base_url, "http://places.local/nearby");
        assert!(config.messaging.is_configured());
        assert_eq!(config.messaging.base_url, "http://twilio.local");
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("HTTP_TIMEOUT_SECS", "-1")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn one_missing_twilio_credential_leaves_messaging_unconfigured() {
        let config = config_from(&[
            ("TWILIO_ACCOUNT_SID", "AC1"),
            ("TWILIO_PHONE_NUMBER", "+15550000000"),
        ]);
        assert!(!config.messaging.is_configured());
    }
}
