#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the Urban Insight simulator.
//!
//! Serves the ward map, runs infrastructure impact simulations over the
//! wards a proposed footprint touches, and suggests placements by proxy
//! metric. The ward dataset is loaded once at startup; if loading fails
//! the server still starts and the data endpoints answer 503.

mod handlers;

use std::path::Path;

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, error, middleware, web};
use urban_insight_ai::NarrativeClient;
use urban_insight_server_models::ApiError;
use urban_insight_ward::WardCollection;

/// Dataset path used when `WARDS_GEOJSON_PATH` is unset.
pub const DEFAULT_WARDS_GEOJSON_PATH: &str = "complete_vizag_data.geojson";

/// Shared application state.
pub struct AppState {
    /// Ward dataset, `None` if it failed to load at startup.
    pub wards: Option<WardCollection>,
    /// Narrative generation client.
    pub narrator: NarrativeClient,
}

impl AppState {
    /// Loads the ward dataset at `path` and builds the narrative client
    /// from the environment.
    ///
    /// A dataset that cannot be read or parsed is logged and left out.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let wards = match WardCollection::load(path) {
            Ok(wards) => Some(wards),
            Err(e) => {
                log::error!("Failed to load ward data from {}: {e}", path.display());
                None
            }
        };

        Self {
            wards,
            narrator: NarrativeClient::from_env(),
        }
    }
}

/// Registers every route. Shared by [`run_server`] and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let detail = format!("Invalid request body: {err}");
        let response = HttpResponse::BadRequest().json(ApiError::new(detail));
        error::InternalError::from_response(err, response).into()
    }))
    .route("/", web::get().to(handlers::root))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/wards", web::get().to(handlers::wards))
            .route("/simulate", web::post().to(handlers::simulate))
            .route(
                "/suggest-placement/{infra_type}",
                web::get().to(handlers::suggest_placement),
            ),
    );
}

/// Starts the Urban Insight API server.
///
/// Loads the ward dataset from `WARDS_GEOJSON_PATH`, builds the narrative
/// client, and starts the Actix-Web HTTP server on `BIND_ADDR:PORT`. The
/// caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let data_path = std::env::var("WARDS_GEOJSON_PATH")
        .unwrap_or_else(|_| DEFAULT_WARDS_GEOJSON_PATH.to_string());

    log::info!("Loading ward data from {data_path}...");
    let state = web::Data::new(AppState::load(Path::new(&data_path)));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
