#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the campus safety application.
//!
//! Serves the JSON API over an in-memory [`SafetyLedger`]: incident
//! reports, emergency alerts (manual and voice-triggered), the campus risk
//! heatmap, the admin summary, user profiles and the safety shop catalog.
//! When a static directory is configured the server also hosts the
//! frontend assets under `/static`.

pub mod config;
pub mod error;
mod handlers;
pub mod interactive;
pub mod validation;
pub mod voice;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use campus_safety_ledger::SafetyLedger;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Shared application state.
pub struct AppState {
    /// The safety ledger every handler reads and writes.
    pub ledger: SafetyLedger,
    /// Name reported by the health check.
    pub service_name: String,
}

impl AppState {
    /// Wraps a ledger with the given service name.
    #[must_use]
    pub fn new(ledger: SafetyLedger, service_name: impl Into<String>) -> Self {
        Self {
            ledger,
            service_name: service_name.into(),
        }
    }
}

/// JSON extractor settings: malformed bodies become [`ApiError::InvalidBody`]
/// so clients always get a JSON error.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::InvalidBody(err.to_string()).into())
}

/// Registers the health check and every `/api` route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(handlers::health))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/report", web::post().to(handlers::report_incident))
                .route(
                    "/trigger-emergency",
                    web::post().to(handlers::trigger_emergency),
                )
                .route(
                    "/cancel-emergency",
                    web::post().to(handlers::cancel_emergency),
                )
                .route("/voice-command", web::post().to(handlers::voice_command))
                .route("/update-battery", web::post().to(handlers::update_battery))
                .route("/safety-map", web::get().to(handlers::safety_map))
                .route("/admin", web::get().to(handlers::admin_summary))
                .route("/profile", web::get().to(handlers::profile))
                .route("/locations", web::get().to(handlers::locations))
                .route("/products", web::get().to(handlers::products))
                .route("/safewalk", web::post().to(handlers::start_safewalk)),
        );
}

/// Starts the campus safety API server.
///
/// Seeds a fresh ledger and serves it until the server is stopped. This is
/// a regular async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    log::info!("Seeding safety ledger...");
    let state = web::Data::new(AppState::new(
        SafetyLedger::seeded(),
        config.service_name.clone(),
    ));

    let static_dir = config.static_dir.clone();
    log::info!("Deployment: {:?}", config.deployment());
    if let Some(dir) = &static_dir {
        log::info!("Serving static assets from {}", dir.display());
    }

    log::info!(
        "Starting {} on {}:{}",
        config.service_name,
        config.bind_addr,
        config.port
    );

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(routes);

        let app = match &static_dir {
            Some(dir) => app.service(Files::new("/static", dir)),
            None => app,
        };

        app.default_service(web::to(handlers::not_found))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
