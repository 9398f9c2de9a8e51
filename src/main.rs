mod config;
mod db;
mod error;
mod handlers;
mod logger;
mod metrics;
mod models;

use axum::{routing::{any, get, Router}};
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use config::Config;
use db::Timeouts;
use metrics::Metrics;

// share the config and counters with all the handlers.
// each request opens and closes its own database connection.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metrics: Arc<Metrics>
}

impl AppState {

    pub fn new(config: Config) -> Self {

        AppState {
            config: Arc::new(config),
            metrics: Arc::new(Metrics::new())
        }

    }

    pub fn timeouts(&self) -> Timeouts {

        Timeouts {
            connect: self.config.connect_timeout,
            query: self.config.query_timeout
        }

    }

}

pub fn app(state: AppState) -> Router {

    Router::new()
        .route(handlers::TIME_ROUTE, any(handlers::db_time))
        .route(handlers::ISO_TIME_ROUTE, get(handlers::db_time_iso))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)

}

#[tokio::main]
async fn main() {

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            process::exit(1);
        }
    };

    if config.database_url.resolve().is_none() {
        tracing::warn!(
            "{} is not set, requests will fail until it is",
            config::DATABASE_URL_VAR
        );
    }

    let addr = config.listen_addr;
    let app = app(AppState::new(config));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("error starting server on {}: {}", addr, e);
            process::exit(1);
        }
    };

    match listener.local_addr() {
        Ok(local) => tracing::info!("listening on {}", local),
        Err(_) => tracing::info!("listening on {}", addr),
    }

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server failed: {}", e);
        process::exit(1);
    }

}
