//! Data models for the Workout Service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account as seen by callers
///
/// The stored credential token is never part of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// A single recorded workout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub owner_id: i64,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_workout_serializes_unix_seconds() {
        let workout = Workout {
            id: 7,
            owner_id: 1,
            start: Utc.timestamp_opt(1000, 0).unwrap(),
            end: Utc.timestamp_opt(2000, 0).unwrap(),
        };

        let json = serde_json::to_value(&workout).unwrap();
        assert_eq!(json["start"], 1000);
        assert_eq!(json["end"], 2000);
    }
}
