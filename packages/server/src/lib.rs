#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the police alert service.
//!
//! Exposes `POST /send-alert`, which looks up police stations near the
//! posted coordinate and texts the nearest ones to the posted phone
//! number, plus `GET /health`. Provider credentials are read once at
//! startup into an [`AppConfig`] and handed to the adapters.

pub mod config;
mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use police_alert_messaging::{MessageSender, TwilioClient};
use police_alert_places::{GooglePlacesClient, PlacesLookup};

pub use config::AppConfig;

/// Shared application state.
pub struct AppState {
    /// Places provider used to find nearby police stations.
    pub places: Arc<dyn PlacesLookup>,
    /// Messaging provider used to deliver the alert.
    pub sender: Arc<dyn MessageSender>,
}

impl AppState {
    /// Builds the provider adapters from `config`.
    ///
    /// Both adapters share one HTTP client carrying the configured
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            places: Arc::new(GooglePlacesClient::new(
                config.places.clone(),
                client.clone(),
            )),
            sender: Arc::new(TwilioClient::new(config.messaging.clone(), client)),
        })
    }
}

/// Registers the API routes and the JSON body error handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(handlers::json_config())
        .route("/health", web::get().to(handlers::health))
        .route("/send-alert", web::post().to(handlers::send_alert));
}

/// Starts the police alert API server.
///
/// Loads `.env` if present, reads [`AppConfig`] from the environment,
/// builds the provider adapters, and runs the Actix-Web HTTP server. The
/// caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP client cannot be built,
/// or the server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env: {e}");
    }

    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = AppConfig::from_env();
    config.warn_missing_credentials();

    log::info!(
        "Provider timeout set to {}s",
        config.http_timeout.as_secs()
    );

    let state = web::Data::new(AppState::from_config(&config).map_err(std::io::Error::other)?);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
