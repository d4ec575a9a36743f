//! HTTP surface: the publish-event trigger and the settings API.

mod routes;

pub use routes::{PublishEvent, SettingsUpdate};

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::Database;
use crate::publisher::Publisher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub publisher: Arc<Publisher>,
}

/// Start the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn serve(config: Config, db: Database, publisher: Arc<Publisher>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.web_host, config.web_port)
        .parse()
        .context("Invalid web server address")?;

    let state = AppState { db, publisher };

    let app = create_app(state);

    info!(addr = %addr, "Starting web server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind web server")?;

    axum::serve(listener, app)
        .await
        .context("Web server error")
}

/// Build the router. Exposed for in-process tests.
#[must_use]
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/events/post-published", post(routes::publish_event))
        .route(
            "/settings",
            get(routes::get_settings).put(routes::update_settings),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
