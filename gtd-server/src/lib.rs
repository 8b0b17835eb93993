//! HTTP server for the Global Terrorism dashboard.
//!
//! Routes:
//! - `GET /` the server-rendered page
//! - `GET /api/layout` control metadata and the output/input dependency table
//! - `POST /api/callback/{output}` one chart's figure for the posted control values
//! - `GET /api/health` status and incident count
//! - `GET /assets/dashboard.js` the client script

pub mod config;
mod handlers;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use config::{Cli, ServerConfig};
use std::ffi::OsString;
use gtd_chart_ui::script::DASHBOARD_JS_PATH;
use gtd_chart_ui::{render_page, DashboardLayout};
use gtd_charts::JitterConfig;
use gtd_db::Database;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use handlers::ApiError;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    jitter: JitterConfig,
    layout: Arc<DashboardLayout>,
    page: Arc<str>,
}

impl AppState {
    /// Compute the layout and render the page once for the loaded table.
    pub fn new(db: Database, jitter: JitterConfig) -> anyhow::Result<Self> {
        let layout = DashboardLayout::from_database(&db).context("failed to build page layout")?;
        let page = render_page(&layout);
        Ok(Self {
            db,
            jitter,
            layout: Arc::new(layout),
            page: page.into(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/layout", get(handlers::layout))
        .route("/api/callback/:output", post(handlers::callback))
        .route("/api/health", get(handlers::health))
        .route(DASHBOARD_JS_PATH, get(handlers::dashboard_js))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Resolve the command line against `data_env` and serve.
///
/// Every startup failure, including a missing data path, comes back
/// through the returned error.
pub async fn run(cli: Cli, data_env: Option<OsString>) -> anyhow::Result<()> {
    let config = cli.into_config(data_env)?;
    serve(config).await
}

/// Load the data file and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::open(&config.data)
        .with_context(|| format!("failed to load incidents from {}", config.data.display()))?;
    let state = AppState::new(db, config.jitter)?;

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    log::info!("[GTD] dashboard available at http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
