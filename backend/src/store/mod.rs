//! Account and workout stores
//!
//! The stores are the only place that touches persisted state. Handlers
//! receive them as trait objects through [`AppState`](crate::state::AppState),
//! so the Postgres implementation can be swapped for the in-memory one in
//! tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;
use workout_service_shared::models::{User, Workout};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store failure kinds
///
/// A closed set matched exhaustively where it is turned into an HTTP
/// response.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a user with the given name already exists")]
    AlreadyExists,

    #[error("a user with the given information could not be found")]
    NotFound,

    #[error("the user's credentials did not match")]
    InvalidCredentials,

    #[error("the workout does not belong to the given user")]
    NotAuthorized,

    #[error("store call did not finish within {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// User accounts and credential checks
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Create a user and return its id.
    ///
    /// `name` must already be normalized. Fails with
    /// [`StoreError::AlreadyExists`] if the name is taken; two concurrent
    /// signups with the same name never both succeed.
    async fn sign_up(&self, name: &str, password_token: &str) -> StoreResult<i64>;

    /// Look a user up by name and check the stored token.
    async fn login_with_credentials(&self, name: &str, password_token: &str)
        -> StoreResult<User>;

    /// Look a user up by bearer token.
    async fn login_with_token(&self, token: &str) -> StoreResult<User>;

    async fn get_username(&self, user_id: i64) -> StoreResult<String>;
}

/// Workout records scoped to their owner
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Record a workout for an existing user and return its id.
    ///
    /// Persists the range as given; ordering of `start` and `end` is checked
    /// by the caller.
    async fn add_workout(
        &self,
        owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64>;

    /// Overwrite the time range of a workout owned by `asserted_owner_id`.
    ///
    /// Fails with [`StoreError::NotAuthorized`] when the stored owner differs
    /// or the workout does not exist. Nothing is modified on failure.
    async fn update_workout(
        &self,
        workout_id: i64,
        asserted_owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Delete a workout by id without checking its owner.
    ///
    /// Deleting an id that does not exist succeeds.
    async fn delete_workout(&self, workout_id: i64) -> StoreResult<()>;

    /// Delete a workout only if it belongs to `asserted_owner_id`.
    ///
    /// Fails closed like [`WorkoutStore::update_workout`].
    async fn delete_owned_workout(&self, workout_id: i64, asserted_owner_id: i64)
        -> StoreResult<()>;

    /// All workouts of a user in insertion order.
    async fn get_workouts(&self, owner_id: i64) -> StoreResult<Vec<Workout>>;
}

/// Connectivity probe used by the readiness endpoint
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;
}
