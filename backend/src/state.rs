//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The stores are injected here as trait objects; handlers never reach for
//! a global connection.

use crate::config::AppConfig;
use crate::store::{AccountStore, StoreHealth, WorkoutStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s or cheap handles, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub workouts: Arc<dyn WorkoutStore>,
    pub health: Arc<dyn StoreHealth>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prometheus render handle, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state around a single backing store
    pub fn new<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: AccountStore + WorkoutStore + StoreHealth + 'static,
    {
        Self {
            accounts: store.clone(),
            workouts: store.clone(),
            health: store,
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered at `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    #[inline]
    pub fn workouts(&self) -> &dyn WorkoutStore {
        self.workouts.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
