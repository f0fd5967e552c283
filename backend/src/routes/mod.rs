//! Route definitions for the Workout Service API
//!
//! This module organizes all API routes and applies middleware.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, Uri},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

mod auth;
mod health;
mod observability;
mod workout;


pub use auth::auth_routes;
pub use workout::workout_routes;

/// Request bodies are small JSON documents
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(health::health_check).fallback(method_not_allowed),
        )
        .route(
            "/health/ready",
            get(health::readiness_check).fallback(method_not_allowed),
        )
        .route(
            "/health/live",
            get(health::liveness_check).fallback(method_not_allowed),
        )
        .route(
            "/metrics",
            get(observability::render_metrics).fallback(method_not_allowed),
        )
        .merge(auth::auth_routes())
        .merge(workout::workout_routes())
        .fallback(endpoint_not_found)
        // Apply middleware layers
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn endpoint_not_found(method: Method, uri: Uri) -> ApiError {
    info!(%method, %uri, "Endpoint not found");
    ApiError::NotFound("endpoint not found".to_string())
}

/// Fallback for a known path called with an unsupported method
pub(crate) async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    info!(%method, %uri, "Method not allowed");
    ApiError::MethodNotAllowed("Method not allowed".to_string())
}
