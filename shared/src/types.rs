//! API request and response types

use crate::models::{User, Workout};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

// ============================================================================
// Account Types
// ============================================================================

/// Signup and login request
///
/// Signup requires `name` and `password`. Login accepts either `name` and
/// `password` or a `token`; missing fields deserialize as empty strings.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub token: String,
}

impl fmt::Debug for UserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRequest")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Signup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub id: i64,
    pub token: String,
}

/// Login response: the user and every workout they own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    pub workouts: Vec<WorkoutResponse>,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Request to record a new workout
///
/// Timestamps are unix seconds. Zero or missing values are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewWorkoutRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub user: i64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub start: i64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub end: i64,
}

/// Request to replace the time range of an existing workout
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub id: i64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub user: i64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub start: i64,
    #[serde(default)]
    #[validate(range(min = 1))]
    pub end: i64,
}

/// Workout as returned to its owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutResponse {
    pub id: i64,
    pub start: i64,
    pub end: i64,
}

impl From<&Workout> for WorkoutResponse {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id,
            start: workout.start.timestamp(),
            end: workout.end.timestamp(),
        }
    }
}

/// Response carrying the id of a newly created resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn test_user_request_missing_fields_default_to_empty() {
        let req: UserRequest = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert!(req.name.is_empty());
        assert!(req.password.is_empty());
        assert_eq!(req.token, "abc");
    }

    #[test]
    fn test_user_request_debug_hides_secrets() {
        let req = UserRequest {
            name: "Bob".to_string(),
            password: "hunter2".to_string(),
            token: "secret-token".to_string(),
        };
        let debug = format!("{:?}", req);
        assert!(debug.contains("Bob"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_new_workout_request_rejects_zero_fields() {
        let req: NewWorkoutRequest = serde_json::from_str(r#"{"user":1,"start":1000}"#).unwrap();
        assert!(req.validate().is_err());

        let req: NewWorkoutRequest =
            serde_json::from_str(r#"{"user":1,"start":1000,"end":2000}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_workout_request_requires_id() {
        let req: UpdateWorkoutRequest =
            serde_json::from_str(r#"{"user":1,"start":1000,"end":2000}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_workout_response_from_workout() {
        let workout = Workout {
            id: 3,
            owner_id: 9,
            start: Utc.timestamp_opt(1000, 0).unwrap(),
            end: Utc.timestamp_opt(2000, 0).unwrap(),
        };
        let response = WorkoutResponse::from(&workout);
        assert_eq!(
            response,
            WorkoutResponse {
                id: 3,
                start: 1000,
                end: 2000
            }
        );
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("owner_id").is_none());
    }
}
