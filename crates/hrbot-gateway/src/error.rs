use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// Errors returned by the HTTP handlers.
///
/// Each variant maps to one status code; the body is `{"detail": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400: blank or invalid input.
    BadRequest(String),
    /// 404: the search returned nothing.
    NotFound(String),
    /// 500: search failed; the message embeds the underlying error.
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable detail.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::BadRequest(d) | ApiError::NotFound(d) | ApiError::Internal(d) => d,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), detail = %self.detail(), "Request failed");
        } else {
            warn!(status = status.as_u16(), detail = %self.detail(), "Request rejected");
        }
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}
