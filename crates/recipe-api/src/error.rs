//! HTTP error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use recipe_core::{Error, ErrorKind};

/// Error returned by REST and chat handlers.
///
/// Body shape: `{"error": message, "kind": kind}`.
#[derive(Debug)]
pub enum ApiError {
    /// Catalog, store or translator failure, classified by `ErrorKind`.
    Catalog(Error),
    NotFound(String),
    BadRequest(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Catalog(err) => err.kind(),
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::BadRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::TranslatorFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::StoreUnavailable | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            ErrorKind::InvalidRequest => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Catalog(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.kind();
        let message = match self {
            ApiError::Catalog(err) => err.to_string(),
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg,
        };

        if status.is_server_error() {
            error!(
                subsystem = "api",
                status = status.as_u16(),
                error_kind = kind.as_str(),
                error = %message,
                "Request failed"
            );
        }

        let body = Json(serde_json::json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}
