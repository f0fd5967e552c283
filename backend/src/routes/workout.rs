//! Workout API routes

use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::routes::method_not_allowed;
use crate::services::WorkoutService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, post},
    Json, Router,
};
use serde::Deserialize;
use workout_service_shared::types::{CreatedResponse, NewWorkoutRequest, UpdateWorkoutRequest};

/// Create workout routes
pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/workout",
            post(add_workout)
                .put(update_workout)
                .fallback(method_not_allowed),
        )
        .route(
            "/workout/:id",
            delete(delete_workout).fallback(method_not_allowed),
        )
}

/// Owner assertion for deletes
#[derive(Debug, Default, Deserialize)]
pub struct DeleteWorkoutQuery {
    pub user: Option<String>,
}

/// POST /workout - Record a workout
async fn add_workout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NewWorkoutRequest>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let created = WorkoutService::add_workout(state.accounts(), state.workouts(), &req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /workout - Replace a workout's time range
async fn update_workout(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateWorkoutRequest>,
) -> ApiResult<StatusCode> {
    WorkoutService::update_workout(state.accounts(), state.workouts(), &req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /workout/:id?user=<owner> - Delete a workout
async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteWorkoutQuery>,
) -> ApiResult<StatusCode> {
    let workout_id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid workout".to_string()))?;
    let owner_id = query
        .user
        .map(|user| user.parse::<i64>())
        .transpose()
        .map_err(|_| ApiError::BadRequest("Invalid user".to_string()))?;

    WorkoutService::delete_workout(
        state.workouts(),
        workout_id,
        owner_id,
        state.config().workouts.require_delete_owner,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
