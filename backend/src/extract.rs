//! Request extractors
//!
//! `JsonBody` behaves like `axum::Json` but rejects malformed bodies with the
//! service's own `{"error": ...}` shape and a 400 status.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::info;
use workout_service_shared::INVALID_REQUEST_MESSAGE;

/// JSON request body extractor with API-shaped rejections
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                info!(reason = %rejection.body_text(), "Rejected malformed request body");
                Err(ApiError::BadRequest(INVALID_REQUEST_MESSAGE.to_string()))
            }
        }
    }
}
