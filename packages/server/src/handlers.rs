//! HTTP handler functions for the police alert API.

use actix_web::{HttpResponse, error, web};
use police_alert::AlertError;
use police_alert_models::{ApiError, ApiHealth, LocationAlertRequest};

use crate::AppState;

/// `GET /health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /send-alert`
///
/// Looks up nearby police stations and texts the first three to the
/// requested phone number.
pub async fn send_alert(
    state: web::Data<AppState>,
    body: web::Json<LocationAlertRequest>,
) -> HttpResponse {
    match police_alert::send_alert(state.places.as_ref(), state.sender.as_ref(), &body).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(&e),
    }
}

/// Maps an [`AlertError`] to a `{detail}` response: 422 for validation
/// failures, 500 for everything else.
fn error_response(err: &AlertError) -> HttpResponse {
    let body = ApiError {
        detail: err.to_string(),
    };
    match err {
        AlertError::Validation(_) => HttpResponse::UnprocessableEntity().json(body),
        AlertError::Configuration { .. }
        | AlertError::Upstream { .. }
        | AlertError::Delivery { .. } => HttpResponse::InternalServerError().json(body),
    }
}

/// Rejects unreadable request bodies with 422 and a `{detail}` body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::UnprocessableEntity().json(ApiError {
            detail: err.to_string(),
        });
        error::InternalError::from_response(err, response).into()
    })
}
