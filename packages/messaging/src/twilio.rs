//! Twilio Programmable Messaging client.
//!
//! - Send: `POST /{api_version}/Accounts/{AccountSid}/Messages.json`
//!   (form fields `To`, `From`, `Body`; HTTP basic auth with the account
//!   SID and auth token)
//!
//! A `201 Created` response carries the message `sid`. Failures carry a
//! JSON body with `code` and `message`.
//!
//! See <https://www.twilio.com/docs/messaging/api/message-resource#create-a-message-resource>

use serde::Deserialize;

use crate::{Credentials, MessageSender, MessagingConfig, MessagingError};

/// SMS sender backed by the Twilio REST API.
pub struct TwilioClient {
    config: MessagingConfig,
    client: reqwest::Client,
}

impl TwilioClient {
    /// Creates a client. `client` is shared with other adapters and should
    /// carry the request timeout.
    #[must_use]
    pub const fn new(config: MessagingConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn messages_url(&self, account_sid: &str) -> String {
        format!(
            "{}/{}/Accounts/{account_sid}/Messages.json",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
        )
    }

    /// Builds the create-message request.
    fn build_request(
        &self,
        creds: Credentials<'_>,
        to: &str,
        body: &str,
    ) -> Result<reqwest::Request, reqwest::Error> {
        self.client
            .post(self.messages_url(creds.account_sid))
            .basic_auth(creds.account_sid, Some(creds.auth_token))
            .form(&[("To", to), ("From", creds.from_number), ("Body", body)])
            .build()
    }
}

#[derive(Deserialize)]
struct MessageResource {
    sid: String,
}

#[derive(Deserialize)]
struct TwilioErrorBody {
    code: Option<i64>,
    message: Option<String>,
}

#[async_trait::async_trait]
impl MessageSender for TwilioClient {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, MessagingError> {
        let Some(creds) = self.config.credentials() else {
            return Err(MessagingError::MissingCredentials);
        };

        let req = self.build_request(creds, to, body)?;
        let resp = self.client.execute(req).await?;

        let status = resp.status();
        let text = resp.text().await?;

        parse_response(status.as_u16(), &text)
    }
}

/// Parses a create-message response into the message SID.
fn parse_response(http_status: u16, body: &str) -> Result<String, MessagingError> {
    if !(200..300).contains(&http_status) {
        let err: Option<TwilioErrorBody> = serde_json::from_str(body).ok();
        let code = err.as_ref().and_then(|e| e.code);
        let message = err
            .and_then(|e| e.message)
            .unwrap_or_else(|| format!("HTTP {http_status}: {body}"));
        return Err(MessagingError::Delivery { message, code });
    }

    let resource: MessageResource =
        serde_json::from_str(body).map_err(|e| MessagingError::Parse {
            message: format!("Invalid message resource: {e}"),
        })?;

    Ok(resource.sid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_created_message() {
        let body = serde_json::json!({
            "sid": "SM123",
            "status": "queued",
            "to": "+15551234567"
        })
        .to_string();
        assert_eq!(parse_response(201, &body).unwrap(), "SM123");
    }

    #[test]
    fn provider_error_text_is_carried() {
        let body = serde_json::json!({
            "code": 21211,
            "message": "The 'To' number +1555 is not a valid phone number.",
            "more_info": "https://www.twilio.com/docs/errors/21211",
            "status": 400
        })
        .to_string();

        let err = parse_response(400, &body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to send SMS: The 'To' number +1555 is not a valid phone number."
        );
        assert!(matches!(
            err,
            MessagingError::Delivery {
                code: Some(21211),
                ..
            }
        ));
    }

    #[test]
    fn non_json_error_falls_back_to_status() {
        let err = parse_response(503, "upstream down").unwrap_err();
        assert_eq!(err.to_string(), "Failed to send SMS: HTTP 503: upstream down");
    }

    #[test]
    fn success_without_sid_is_parse_error() {
        let err = parse_response(201, "{}").unwrap_err();
        assert!(matches!(err, MessagingError::Parse { .. }));
    }

    #[test]
    fn builds_messages_url() {
        let config = MessagingConfig::new(
            Some("AC1".to_string()),
            Some("token".to_string()),
            Some("+15550000000".to_string()),
            Some("http://localhost:4010/".to_string()),
        );
        let client = TwilioClient::new(config, reqwest::Client::new());
        assert_eq!(
            client.messages_url("AC1"),
            "http://localhost:4010/2010-04-01/Accounts/AC1/Messages.json"
        );
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_request() {
        let config = MessagingConfig::new(
            Some("AC1".to_string()),
            None,
            Some("+15550000000".to_string()),
            Some("http://127.0.0.1:1".to_string()),
        );
        let client = TwilioClient::new(config, reqwest::Client::new());

        let err = client
            .send_sms("+15551234567", "Alert! Nearby police stations:\n")
            .await
            .unwrap_err();
        assert!(matches!(err, MessagingError::MissingCredentials));
    }

    fn configured_client(account_sid: &str, base_url: &str) -> TwilioClient {
        let config = MessagingConfig::new(
            Some(account_sid.to_string()),
            Some("token".to_string()),
            Some("+15550000000".to_string()),
            Some(base_url.to_string()),
        );
        TwilioClient::new(config, reqwest::Client::new())
    }

    #[test]
    fn request_carries_form_and_basic_auth() {
        let client = configured_client("AC1", "https://api.twilio.example");
        let creds = client.config.credentials().unwrap();
        let req = client
            .build_request(creds, "+15551234567", "Stay safe")
            .unwrap();

        assert_eq!(req.method(), reqwest::Method::POST);
        assert_eq!(
            req.url().as_str(),
            "https://api.twilio.example/2010-04-01/Accounts/AC1/Messages.json"
        );
        assert_eq!(
            req.headers()[reqwest::header::AUTHORIZATION],
            "Basic QUMxOnRva2Vu"
        );
        assert_eq!(
            req.headers()[reqwest::header::CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
        let form = req.body().and_then(reqwest::Body::as_bytes).unwrap();
        assert_eq!(form, b"To=%2B15551234567&From=%2B15550000000&Body=Stay+safe");
    }

    #[tokio::test]
    async fn transport_error_hides_account_sid() {
        // Nothing listens on port 1, so the request fails to connect.
        let client = configured_client("ACsecretSID", "http://127.0.0.1:1");

        let err = client
            .send_sms("+15551234567", "Stay safe")
            .await
            .unwrap_err();

        assert!(matches!(err, MessagingError::Http(_)));
        assert!(!err.to_string().contains("ACsecretSID"), "leaked SID: {err}");
        assert!(!format!("{err:?}").contains("ACsecretSID"), "leaked SID: {err:?}");
    }
}
