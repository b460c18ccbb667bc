//! Local web server for the dashboard
//!
//! Every dashboard request reloads through the [`DatasetCache`], then runs
//! filter, aggregate and render on a blocking worker.

mod error;
mod page;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

pub use error::{ApiError, ErrorBody};
pub use page::INDEX_HTML;

use crate::cache::DatasetCache;
use crate::config::DashboardConfig;
use crate::dashboard::{DashboardView, build_dashboard};
use crate::filter::Selection;
use crate::models::SalesTable;

/// Shared server state
#[derive(Debug)]
pub struct AppState {
    pub config: DashboardConfig,
    pub cache: DatasetCache,
}

impl AppState {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            cache: DatasetCache::new(config.clone()),
            config,
        }
    }

    /// The current table, reloading if the file changed
    pub fn table(&self) -> crate::Result<Arc<SalesTable>> {
        self.cache.get_or_load(&self.config.data_path)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Construct the dashboard router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/filters", get(filter_options))
        .route("/api/dashboard", post(dashboard))
        .route("/health", get(health_check))
        .with_state(Arc::new(state))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Distinct regions and categories, used to populate the sidebar
///
/// GET /api/filters
async fn filter_options(State(state): State<Arc<AppState>>) -> Result<Json<Selection>, ApiError> {
    let options = tokio::task::spawn_blocking(move || {
        let table = state.table()?;
        Selection::all(&table)
    })
    .await??;
    Ok(Json(options))
}

/// Recompute the dashboard for one selection
///
/// POST /api/dashboard
async fn dashboard(
    State(state): State<Arc<AppState>>,
    Json(selection): Json<Selection>,
) -> Result<Json<DashboardView>, ApiError> {
    let view = tokio::task::spawn_blocking(move || {
        let table = state.table()?;
        build_dashboard(&table, &selection, &state.config)
    })
    .await??;
    Ok(Json(view))
}
