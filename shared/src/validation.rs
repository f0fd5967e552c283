//! Input validation functions
//!
//! This module turns raw request payloads into checked values. Field-level
//! rules use the `validator` crate derive macros on the request types; the
//! cross-field rules live here.

use crate::errors::ValidationError;
use crate::types::UserRequest;
use chrono::{DateTime, Utc};
use validator::Validate;

/// Normalize a user name: trim surrounding whitespace, lowercase, then
/// capitalize the first letter of every word.
///
/// A word starts at the beginning of the name or after any character that is
/// not alphanumeric or an underscore, so `"mary-ANN o'neil"` becomes
/// `"Mary-Ann O'Neil"`.
///
/// Characters whose case mapping expands to several characters (`ß`, `ﬁ`,
/// `İ`) are kept as they are, so normalizing a normalized name is a no-op.
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut at_word_start = true;

    for c in name.trim().chars() {
        if at_word_start {
            normalized.push(single_char_mapping(c, c.to_uppercase()));
        } else {
            normalized.push(single_char_mapping(c, c.to_lowercase()));
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }

    normalized
}

fn single_char_mapping(original: char, mut mapped: impl Iterator<Item = char>) -> char {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => c,
        _ => original,
    }
}

/// Validated signup input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupInput {
    pub name: String,
    pub password: String,
}

/// Validate a signup request and normalize its name
pub fn validate_signup(req: &UserRequest) -> Result<SignupInput, ValidationError> {
    let name = normalize_name(&req.name);
    if name.is_empty() {
        return Err(ValidationError::EmptyField("name"));
    }
    if req.password.is_empty() {
        return Err(ValidationError::EmptyField("password"));
    }

    Ok(SignupInput {
        name,
        password: req.password.clone(),
    })
}

/// How a login request identifies the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginCredentials {
    /// Normalized name and raw password
    Password { name: String, password: String },
    /// Previously issued bearer token
    Token(String),
}

/// Decide which credentials a login request carries
///
/// Name and password take precedence over a token when both are supplied.
pub fn validate_login(req: &UserRequest) -> Result<LoginCredentials, ValidationError> {
    let name = normalize_name(&req.name);
    if !name.is_empty() && !req.password.is_empty() {
        return Ok(LoginCredentials::Password {
            name,
            password: req.password.clone(),
        });
    }

    if !req.token.is_empty() {
        return Ok(LoginCredentials::Token(req.token.clone()));
    }

    Err(ValidationError::MissingCredentials)
}

/// Run the field-level rules derived on a request type
pub fn validate_fields<T: Validate>(req: &T) -> Result<(), ValidationError> {
    req.validate()
        .map_err(|e| ValidationError::InvalidFields(e.to_string()))
}

/// Convert a unix timestamp in seconds to a UTC datetime
pub fn timestamp_to_datetime(secs: i64) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::from_timestamp(secs, 0).ok_or(ValidationError::TimestampOutOfRange(secs))
}

/// Validate a workout time range; `end` must be strictly after `start`
pub fn validate_time_range(
    start: i64,
    end: i64,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ValidationError> {
    let start_at = timestamp_to_datetime(start)?;
    let end_at = timestamp_to_datetime(end)?;

    if end_at <= start_at {
        return Err(ValidationError::EndNotAfterStart { start, end });
    }

    Ok((start_at, end_at))
}
