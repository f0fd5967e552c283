//! In-memory implementation of the stores
//!
//! Mirrors the Postgres semantics (unique names, owner must exist, ids
//! assigned in insertion order) behind a single lock. Used by the router
//! tests and for running the service without a database.

use super::{AccountStore, StoreError, StoreHealth, StoreResult, WorkoutStore};
use crate::auth::CredentialCodec;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use workout_service_shared::models::{User, Workout};

#[derive(Debug, Clone)]
struct StoredUser {
    id: i64,
    name: String,
    token: String,
}

impl StoredUser {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<StoredUser>,
    workouts: Vec<Workout>,
    last_user_id: i64,
    last_workout_id: i64,
}

/// In-memory account and workout store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn sign_up(&self, name: &str, password_token: &str) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.name == name) {
            return Err(StoreError::AlreadyExists);
        }

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        tables.users.push(StoredUser {
            id,
            name: name.to_string(),
            token: password_token.to_string(),
        });
        Ok(id)
    }

    async fn login_with_credentials(
        &self,
        name: &str,
        password_token: &str,
    ) -> StoreResult<User> {
        let tables = self.tables.read().await;
        let user = tables
            .users
            .iter()
            .find(|u| u.name == name)
            .ok_or(StoreError::NotFound)?;

        if !CredentialCodec::matches(password_token, &user.token) {
            return Err(StoreError::InvalidCredentials);
        }
        Ok(user.to_user())
    }

    async fn login_with_token(&self, token: &str) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| CredentialCodec::matches(token, &u.token))
            .map(StoredUser::to_user)
            .ok_or(StoreError::NotFound)
    }

    async fn get_username(&self, user_id: i64) -> StoreResult<String> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn add_workout(
        &self,
        owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<i64> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == owner_id) {
            return Err(StoreError::NotFound);
        }

        tables.last_workout_id += 1;
        let id = tables.last_workout_id;
        tables.workouts.push(Workout {
            id,
            owner_id,
            start,
            end,
        });
        Ok(id)
    }

    async fn update_workout(
        &self,
        workout_id: i64,
        asserted_owner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let workout = tables
            .workouts
            .iter_mut()
            .find(|w| w.id == workout_id && w.owner_id == asserted_owner_id)
            .ok_or(StoreError::NotAuthorized)?;

        workout.start = start;
        workout.end = end;
        Ok(())
    }

    async fn delete_workout(&self, workout_id: i64) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.workouts.retain(|w| w.id != workout_id);
        Ok(())
    }

    async fn delete_owned_workout(
        &self,
        workout_id: i64,
        asserted_owner_id: i64,
    ) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let position = tables
            .workouts
            .iter()
            .position(|w| w.id == workout_id && w.owner_id == asserted_owner_id)
            .ok_or(StoreError::NotAuthorized)?;

        tables.workouts.remove(position);
        Ok(())
    }

    async fn get_workouts(&self, owner_id: i64) -> StoreResult<Vec<Workout>> {
        let tables = self.tables.read().await;
        Ok(tables
            .workouts
            .iter()
            .filter(|w| w.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
