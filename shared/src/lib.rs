//! Workout Service Shared Library
//!
//! This crate contains the wire types, domain models and input validation
//! used by the backend and by its clients.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::{User, Workout};
pub use types::*;
