use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::REGRISK_STATUS_HEADER;
use crate::narrative::NarrativeError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request relies on startup data that was not configured.
    #[error("{0} not configured")]
    MissingDefault(&'static str),

    #[error("analysis not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("narrative generation failed: {0}")]
    NarrativeFailed(#[from] NarrativeError),

    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::MissingDefault(_) => (StatusCode::BAD_REQUEST, "missing_input"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::StorageError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
            }
            GatewayError::NarrativeFailed(_) => (StatusCode::BAD_GATEWAY, "narrative_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, regrisk_status) = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            REGRISK_STATUS_HEADER,
            HeaderValue::from_static(regrisk_status),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
