#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the bike-share visualization pages.
//!
//! The trip dataset is loaded once before the server binds and handed to
//! every worker as read-only [`AppState`]. Each `/viz/{chart}` request
//! builds one chart specification from it and renders the page template.
//! The `/api` scope exposes a health check and the raw chart specs.

mod handlers;
pub mod interactive;
pub mod page;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use bike_viz_chart::ChartError;
use bike_viz_dataset::DatasetError;
use bike_viz_trip_models::TripTable;
use thiserror::Error;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Errors that can occur while starting the server or building a response.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The dataset could not be loaded at startup.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// A chart specification could not be built.
    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    /// A chart specification could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The page template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// An interactive prompt failed.
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Binding or running the HTTP server failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// The trip dataset, read by every request.
    pub table: Arc<TripTable>,
}

impl AppState {
    #[must_use]
    pub fn new(table: TripTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

/// Where to listen and what to serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind.
    pub bind_addr: String,
    /// Port to bind.
    pub port: u16,
    /// Trip dataset CSV.
    pub data_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            data_path: bike_viz_dataset::paths::default_dataset_path(),
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT` and `BIKE_VIZ_DATA`, falling back to the
    /// defaults for unset or unparseable values.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            data_path: lookup("BIKE_VIZ_DATA").map_or(defaults.data_path, PathBuf::from),
        }
    }
}

/// Registers every route. Shared by [`run_server`] and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/viz/{chart}", web::get().to(handlers::chart_page))
        .service(
            web::scope("/api")
                .wrap(Cors::permissive())
                .route("/health", web::get().to(handlers::health))
                .route("/charts/{chart}", web::get().to(handlers::chart_spec)),
        );
}

/// Loads the dataset and runs the HTTP server until shutdown.
///
/// The caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// * [`ServerError::Dataset`] if the dataset cannot be loaded; the server
///   never binds in that case
/// * [`ServerError::Io`] if the server fails to bind or run
#[allow(clippy::future_not_send)]
pub async fn run_server(config: &ServerConfig) -> Result<(), ServerError> {
    let table = bike_viz_dataset::load(&config.data_path)?;
    let state = web::Data::new(AppState::new(table));

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert!(config.data_path.ends_with("data/bikes_data.csv"));
    }

    #[test]
    fn reads_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "BIND_ADDR" => Some("0.0.0.0".to_string()),
            "PORT" => Some("9000".to_string()),
            "BIKE_VIZ_DATA" => Some("/tmp/trips.csv".to_string()),
            _ => None,
        });
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.data_path, PathBuf::from("/tmp/trips.csv"));
    }

    #[test]
    fn ignores_unparseable_port() {
        let config = ServerConfig::from_lookup(|key| (key == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, DEFAULT_PORT);
    }
}
