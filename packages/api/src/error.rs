//! Client-facing error taxonomy.
//!
//! Every service operation returns [`ApiError`]. The first five variants are
//! expected outcomes the caller can act on; the web layer maps each one to a
//! status code and a JSON `{"error": ...}` body.

use store::{SlugError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("service temporarily unavailable")]
    Unavailable(String),

    #[error("{0}")]
    Invalid(String),

    #[error("internal error")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn slug_taken() -> Self {
        ApiError::Conflict("slug already taken — choose another".to_string())
    }

    pub fn note_not_found() -> Self {
        ApiError::NotFound("note not found".to_string())
    }

    pub fn wrong_password() -> Self {
        ApiError::Unauthorized("invalid password".to_string())
    }

    pub fn not_owner() -> Self {
        ApiError::Forbidden("you do not own this note".to_string())
    }

    pub fn not_authenticated() -> Self {
        ApiError::Unauthorized("not authenticated".to_string())
    }

    /// Short machine-readable tag, handy in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Conflict(_) => "conflict",
            ApiError::NotFound(_) => "not_found",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Unavailable(_) => "unavailable",
            ApiError::Invalid(_) => "invalid",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict("slug") => ApiError::slug_taken(),
            StoreError::Conflict(what) => ApiError::Conflict(format!("{what} already exists")),
            StoreError::NotFound(what) => ApiError::NotFound(format!("{what} not found")),
            StoreError::Unavailable(detail) => ApiError::Unavailable(detail),
            StoreError::Backend(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<SlugError> for ApiError {
    fn from(value: SlugError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}
