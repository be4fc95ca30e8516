//! HTTP server for the contact form.
//!
//! Routes the contact endpoints through axum and wraps them in request
//! tracing. Handlers share an [`AppState`] holding the contact store, the
//! CSRF tokens, the commune lookup and the metrics.

pub mod handlers;

pub use handlers::AppError;

use crate::client::{CommuneClient, CommuneLookup};
use crate::config::Config;
use crate::csrf::CsrfTokens;
use crate::metrics::Metrics;
use crate::storage::{ContactStore, CsvContactStore};
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ContactStore>,
    pub csrf: CsrfTokens,
    pub communes: Arc<dyn CommuneLookup>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ContactStore>,
        communes: Arc<dyn CommuneLookup>,
        csrf: CsrfTokens,
    ) -> Self {
        Self {
            store,
            csrf,
            communes,
            metrics: Metrics::new(),
        }
    }

    /// Wire the CSV store and the commune client described by `config`.
    pub fn from_config(config: &Config) -> Self {
        let store = Arc::new(CsvContactStore::new(config.storage_dir.clone())) as Arc<dyn ContactStore>;
        let communes = Arc::new(CommuneClient::new(config)) as Arc<dyn CommuneLookup>;
        let csrf = CsrfTokens::new(Duration::from_secs(config.csrf_token_ttl_minutes * 60));
        Self::new(store, communes, csrf)
    }
}

/// Build the router with every contact endpoint.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/contact/submit", post(handlers::submit_contact))
        .route("/contact/token", get(handlers::issue_token))
        .route("/contact/schema", get(handlers::contact_schema))
        .route("/contact/city/:postal_code", get(handlers::lookup_city))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until the process stops.
pub async fn run_server(config: &Config, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
