use api::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// HTTP face of [`ApiError`]: a status code plus `{"error": message}`.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Invalid(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(ApiError::Invalid(rejection.body_text()))
    }
}

/// Every path parameter names a note; one that cannot be parsed names none.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "unparsable path parameter");
        AppError(ApiError::note_not_found())
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError(ApiError::Internal(format!("session: {err}")))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.0 {
            // details stay in the log; the client only sees the generic message
            ApiError::Unavailable(detail) | ApiError::Internal(detail) => {
                tracing::error!(kind = self.0.kind(), %detail, "request failed");
            }
            other => tracing::debug!(kind = other.kind(), error = %other, "request rejected"),
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
