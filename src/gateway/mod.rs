//! HTTP gateway (Axum) feeding the risk dashboard.
//!
//! This module is primarily used by the `regrisk` server binary.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{
    get_analysis_handler, list_analyses_handler, rank_handler, report_handler, score_handler,
};
pub use state::HandlerState;

use crate::constants::{
    REGRISK_STATUS_ERROR, REGRISK_STATUS_HEADER, REGRISK_STATUS_HEALTHY, REGRISK_STATUS_READY,
};

/// Builds the dashboard API. CORS is open: the dashboard is served from another origin.
pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/score", post(score_handler))
        .route("/v1/rank", post(rank_handler))
        .route("/v1/analyses", get(list_analyses_handler))
        .route("/v1/analyses/{id}", get(get_analysis_handler))
        .route("/v1/report", post(report_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub storage: &'static str,
    pub regulations: usize,
    pub profile: bool,
    pub narrative: &'static str,
    pub scan_text: bool,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        REGRISK_STATUS_HEADER,
        HeaderValue::from_static(REGRISK_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Ready once the storage directory (if any) exists.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let storage = match &state.storage_path {
        Some(path) if !path.is_dir() => REGRISK_STATUS_ERROR,
        _ => REGRISK_STATUS_READY,
    };

    let components = ComponentStatus {
        http: REGRISK_STATUS_READY,
        storage,
        regulations: state.default_regulations.len(),
        profile: state.default_profile.is_some(),
        narrative: if state.narrator.is_some() {
            "enabled"
        } else {
            "disabled"
        },
        scan_text: state.scorer.scans_text(),
    };

    let is_ready = components.storage == REGRISK_STATUS_READY;
    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    let mut headers = HeaderMap::new();
    headers.insert(REGRISK_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
