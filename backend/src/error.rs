//! Application error handling
//!
//! This module is the single place where store and validation failures are
//! turned into HTTP responses. Every error body has the shape
//! `{"error": "<message>"}` and never carries storage-layer detail.

use crate::store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info};
use workout_service_shared::{ErrorResponse, ValidationError};

/// Message returned when a signup name is already registered
pub const NAME_TAKEN_MESSAGE: &str = "the given name already exists";

/// Message returned for any failure the caller cannot act on
pub const INTERNAL_ERROR_MESSAGE: &str = "Unable to process request";

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Store error: {0}")]
    Store(#[source] StoreError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists => ApiError::BadRequest(NAME_TAKEN_MESSAGE.to_string()),
            StoreError::NotFound => {
                ApiError::NotFound("The specified user could not be found".to_string())
            }
            StoreError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            StoreError::NotAuthorized => {
                ApiError::Unauthorized("The requested workout does not belong to you".to_string())
            }
            StoreError::Timeout(_) | StoreError::Database(_) | StoreError::Internal(_) => {
                ApiError::Store(err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(err) => {
                info!(reason = %err, "Rejected invalid request");
                (StatusCode::BAD_REQUEST, err.user_message().to_string())
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg.clone()),
            ApiError::Store(err) => {
                error!("Store error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::time::Duration;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[rstest]
    #[case(StoreError::AlreadyExists, StatusCode::BAD_REQUEST)]
    #[case(StoreError::NotFound, StatusCode::NOT_FOUND)]
    #[case(StoreError::InvalidCredentials, StatusCode::UNAUTHORIZED)]
    #[case(StoreError::NotAuthorized, StatusCode::UNAUTHORIZED)]
    #[case(StoreError::Timeout(Duration::from_secs(5)), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(StoreError::Database(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(
        StoreError::Internal(anyhow::anyhow!("boom")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_store_error_status(#[case] err: StoreError, #[case] expected: StatusCode) {
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_name_taken_message() {
        let response = ApiError::from(StoreError::AlreadyExists).into_response();
        let body = body_of(response).await;
        assert_eq!(body["error"], NAME_TAKEN_MESSAGE);
    }

    #[tokio::test]
    async fn test_internal_detail_is_not_exposed() {
        let err = StoreError::Internal(anyhow::anyhow!("password authentication failed for user"));
        let response = ApiError::from(err).into_response();
        let body = body_of(response).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_validation_error_status() {
        let err = ValidationError::EndNotAfterStart { start: 2, end: 1 };
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_of(response).await;
        assert_eq!(body["error"], "End time must be greater than start time");
    }
}
