use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use instdir_core::DirError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DirError> for ApiError {
    fn from(e: DirError) -> Self {
        match e {
            DirError::InstitutionNotFound(id) => ApiError::NotFound(id),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::InternalError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found.".to_string()),
            ApiError::InternalError(msg) => {
                error!("request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identity_is_404() {
        let e = ApiError::from(DirError::InstitutionNotFound("7".into()));
        assert!(matches!(e, ApiError::NotFound(ref id) if id == "7"));
        assert_eq!(e.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_is_500() {
        let e = ApiError::from(DirError::Store("down".into()));
        assert_eq!(e.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
