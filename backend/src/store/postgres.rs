//! PostgreSQL implementation of the stores
//!
//! Every call is bounded by the configured query timeout. Uniqueness of user
//! names and existence of workout owners are enforced by table constraints,
//! so the checks here are single statements rather than read-then-write
//! sequences.

use super::{AccountStore, StoreError, StoreHealth, StoreResult, WorkoutStore};
use crate::auth::CredentialCodec;
use crate::db;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use workout_service_shared::models::{User, Workout};

/// Workout record from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct WorkoutRecord {
    id: i64,
    user_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl From<WorkoutRecord> for Workout {
    fn from(record: WorkoutRecord) -> Self {
        Self {
            id: record.id,
            owner_id: record.user_id,
            start: record.start_time,
            end: record.end_time,
        }
    }
}

/// User row including the stored credential token
#[derive(Debug, Clone, sqlx::FromRow)]
struct CredentialRecord {
    id: i64,
    name: String,
    password: String,
}

/// Postgres-backed account and workout store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn with_deadline<T, F>(&self, query: F) -> StoreResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        tokio::time::timeout(self.query_timeout, query)
            .await
            .unwrap_or_else(|_| Err(StoreError::Timeout(self.query_timeout)))
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[async_trait]
impl AccountStore for PgStore {
    async fn sign_up(&self, name: &str, password_token: &str) -> StoreResult<i64> {
        self.with_deadline(async {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO users (name, password, token)
                VALUES ($1, $2, $2)
                RETURNING id
                "#,
            )
            .bind(name)
            .bind(password_token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::AlreadyExists
                } else {
                    StoreError::Database(e)
                }
            })
        })
        .await
    }

    async fn login_with_credentials(
        &self,
        name: &str,
        password_token: &str,
    ) -> StoreResult<User> {
        let record = self
            .with_deadline(async {
                sqlx::query_as::<_, CredentialRecord>(
                    r#"
                    SELECT id, name, password
                    FROM users
                    WHERE name = $1
                    "#,
                )
                .bind(name)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::from)
            })
            .await?
            .ok_or(StoreError::NotFound)?;

        if !CredentialCodec::matches(password_token, &record.password) {
            return Err(StoreError::InvalidCredentials);
        }

        Ok(User {
            id: record.id,
            name: record.name,
        })
    }

    async fn login_with_token(&self, token: &str) -> StoreResult<User> {
        let row = self
            .with_deadline(async {
                sqlx::query_as::<_, (i64, String)>(
                    r#"
                    SELECT id, name
                    FROM users
                    WHERE token = $1
                    ORDER BY id
                    LIMIT 1
                    "#,
                )
                .bind(token)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::from)
            })
            .await?;

        let (id, name) = row.ok_or(StoreError::NotFound)?;
        Ok(User { id, name })
    }

    async fn get_username(&self, user_id: i64) -> StoreResult<String> {
        self.with_deadline(async {
            sqlx::query_scalar::<_, String>("SELECT name FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?
        .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl WorkoutStore for PgStore {
    async fn add_workout(
        &self,
        owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64> {
        self.with_deadline(async {
            sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO workouts (user_id, start_time, end_time)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(owner_id)
            .bind(start)
            .bind(end)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    StoreError::NotFound
                } else {
                    StoreError::Database(e)
                }
            })
        })
        .await
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        asserted_owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<()> {
        let result = self
            .with_deadline(async {
                sqlx::query(
                    r#"
                    UPDATE workouts
                    SET start_time = $3, end_time = $4
                    WHERE id = $1 AND user_id = $2
                    "#,
                )
                .bind(workout_id)
                .bind(asserted_owner_id)
                .bind(start)
                .bind(end)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from)
            })
            .await?;

        // No row means either a different owner or no such workout.
        if result.rows_affected() == 0 {
            return Err(StoreError::NotAuthorized);
        }
        Ok(())
    }

    async fn delete_workout(&self, workout_id: i64) -> StoreResult<()> {
        self.with_deadline(async {
            sqlx::query("DELETE FROM workouts WHERE id = $1")
                .bind(workout_id)
                .execute(&self.pool)
                .await
                .map_err(StoreError::from)
        })
        .await?;
        Ok(())
    }

    async fn delete_owned_workout(
        &self,
        workout_id: i64,
        asserted_owner_id: i64,
    ) -> StoreResult<()> {
        let result = self
            .with_deadline(async {
                sqlx::query("DELETE FROM workouts WHERE id = $1 AND user_id = $2")
                    .bind(workout_id)
                    .bind(asserted_owner_id)
                    .execute(&self.pool)
                    .await
                    .map_err(StoreError::from)
            })
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotAuthorized);
        }
        Ok(())
    }

    async fn get_workouts(&self, owner_id: i64) -> StoreResult<Vec<Workout>> {
        let records = self
            .with_deadline(async {
                sqlx::query_as::<_, WorkoutRecord>(
                    r#"
                    SELECT id, user_id, start_time, end_time
                    FROM workouts
                    WHERE user_id = $1
                    ORDER BY id
                    "#,
                )
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StoreError::from)
            })
            .await?;

        Ok(records.into_iter().map(Workout::from).collect())
    }
}

#[async_trait]
impl StoreHealth for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        self.with_deadline(async { db::health_check(&self.pool).await.map_err(StoreError::from) })
            .await
    }
}
