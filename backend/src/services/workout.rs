//! Workout service
//!
//! Checks request shape and time ordering before any store call. Ownership
//! is enforced by the store itself.

use crate::error::ApiError;
use crate::store::{AccountStore, WorkoutStore};
use tracing::{debug, info, warn};
use workout_service_shared::types::{CreatedResponse, NewWorkoutRequest, UpdateWorkoutRequest};
use workout_service_shared::validation::{validate_fields, validate_time_range};
use workout_service_shared::ValidationError;

/// Workout service for recording and editing sessions
pub struct WorkoutService;

impl WorkoutService {
    /// Record a new workout for an existing user
    pub async fn add_workout(
        accounts: &dyn AccountStore,
        workouts: &dyn WorkoutStore,
        req: &NewWorkoutRequest,
    ) -> Result<CreatedResponse, ApiError> {
        validate_fields(req)?;
        let (start, end) = validate_time_range(req.start, req.end)?;

        let id = workouts.add_workout(req.user, start, end).await?;

        metrics::counter!("workout_service_workout_writes_total", "op" => "add").increment(1);
        let name = Self::username_for_log(accounts, req.user).await;
        info!(name = %name, workout = id, "Added workout");

        Ok(CreatedResponse { id })
    }

    /// Replace the time range of a workout owned by the asserted user
    pub async fn update_workout(
        accounts: &dyn AccountStore,
        workouts: &dyn WorkoutStore,
        req: &UpdateWorkoutRequest,
    ) -> Result<(), ApiError> {
        validate_fields(req)?;
        let (start, end) = validate_time_range(req.start, req.end)?;

        workouts.update_workout(req.id, req.user, start, end).await?;

        metrics::counter!("workout_service_workout_writes_total", "op" => "update").increment(1);
        let name = Self::username_for_log(accounts, req.user).await;
        debug!(name = %name, workout = req.id, %start, %end, "Updated workout");
        info!(name = %name, "Updated workout");

        Ok(())
    }

    /// Delete a workout
    ///
    /// With an asserted owner the store verifies ownership. Without one the
    /// delete is only allowed when `require_owner` is false, in which case
    /// any workout can be removed by id.
    pub async fn delete_workout(
        workouts: &dyn WorkoutStore,
        workout_id: i64,
        asserted_owner_id: Option<i64>,
        require_owner: bool,
    ) -> Result<(), ApiError> {
        if workout_id <= 0 {
            return Err(ApiError::BadRequest("Invalid workout".to_string()));
        }

        match asserted_owner_id {
            Some(owner_id) if owner_id > 0 => {
                workouts.delete_owned_workout(workout_id, owner_id).await?;
            }
            Some(_) => return Err(ValidationError::EmptyField("user").into()),
            None if require_owner => return Err(ValidationError::EmptyField("user").into()),
            None => {
                warn!(workout = workout_id, "Deleting workout without an owner check");
                workouts.delete_workout(workout_id).await?;
            }
        }

        metrics::counter!("workout_service_workout_writes_total", "op" => "delete").increment(1);
        info!(id = workout_id, "Deleted workout");
        Ok(())
    }

    /// Best-effort name lookup for log lines; the write has already happened
    async fn username_for_log(accounts: &dyn AccountStore, user_id: i64) -> String {
        match accounts.get_username(user_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!(user_id, error = %e, "Could not look up user name");
                format!("user#{}", user_id)
            }
        }
    }
}
