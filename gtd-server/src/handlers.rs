//! HTTP handlers for the dashboard API.

use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use gtd_chart_ui::script::DASHBOARD_JS;
use gtd_chart_ui::DashboardLayout;
use gtd_charts::{dispatch, CallbackRequest, Figure, OutputId};
use serde_json::json;

/// Error answered as `{"error": message}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        log::error!("[GTD] request failed: {:#}", err);
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.page.to_string())
}

/// `GET /api/layout`
pub async fn layout(State(state): State<AppState>) -> Json<DashboardLayout> {
    Json(DashboardLayout::clone(&state.layout))
}

/// `POST /api/callback/{output}`
///
/// An empty body means every control is undefined.
pub async fn callback(
    State(state): State<AppState>,
    Path(output): Path<String>,
    body: Bytes,
) -> Result<Json<Figure>, ApiError> {
    let output: OutputId = output
        .parse()
        .map_err(|e: gtd_charts::UnknownOutput| ApiError::new(StatusCode::NOT_FOUND, e.to_string()))?;

    let request: CallbackRequest = if body.iter().all(u8::is_ascii_whitespace) {
        CallbackRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("Invalid callback body: {}", e),
            )
        })?
    };

    let db = state.db.clone();
    let jitter = state.jitter;
    let figure = tokio::task::spawn_blocking(move || dispatch(output, &db, &request, jitter))
        .await
        .map_err(|e| ApiError::internal(e.into()))?
        .map_err(ApiError::internal)?;

    log::debug!(
        "[GTD] {} rendered with {} series",
        output,
        figure.series_count()
    );
    Ok(Json(figure))
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let db = state.db.clone();
    let incidents = tokio::task::spawn_blocking(move || db.query_incident_count())
        .await
        .map_err(|e| ApiError::internal(e.into()))?
        .map_err(ApiError::internal)?;
    Ok(Json(json!({ "status": "ok", "incidents": incidents })))
}

/// `GET /assets/dashboard.js`
pub async fn dashboard_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        DASHBOARD_JS,
    )
}
