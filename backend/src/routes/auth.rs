//! Authentication routes
//!
//! Provides endpoints for user registration and login.

use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::routes::method_not_allowed;
use crate::services::AccountService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use workout_service_shared::types::{LoginResponse, SignupResponse, UserRequest};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(sign_up).fallback(method_not_allowed))
        .route("/login", post(login).fallback(method_not_allowed))
}

/// Register a new user
///
/// POST /signup
async fn sign_up(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UserRequest>,
) -> ApiResult<(StatusCode, Json<SignupResponse>)> {
    let response = AccountService::sign_up(state.accounts(), &req).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Login with name and password, or with a token
///
/// POST /login
async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UserRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = AccountService::login(state.accounts(), state.workouts(), &req).await?;
    Ok(Json(response))
}
