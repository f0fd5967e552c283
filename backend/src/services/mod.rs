//! Business logic services
//!
//! Services validate request payloads, call the stores, and log what
//! happened. Store failures propagate as `ApiError` via `From<StoreError>`.

pub mod account;
pub mod workout;

pub use account::AccountService;
pub use workout::WorkoutService;
