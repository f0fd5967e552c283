//! Account service for signup and login

use crate::auth::CredentialCodec;
use crate::error::ApiError;
use crate::store::{AccountStore, StoreError, WorkoutStore};
use tracing::info;
use workout_service_shared::types::{LoginResponse, SignupResponse, UserRequest, WorkoutResponse};
use workout_service_shared::validation::{validate_login, validate_signup, LoginCredentials};

/// Account service for authentication operations
pub struct AccountService;

impl AccountService {
    /// Register a new user and return its id and bearer token
    ///
    /// The name is normalized before the uniqueness check and storage.
    pub async fn sign_up(
        accounts: &dyn AccountStore,
        req: &UserRequest,
    ) -> Result<SignupResponse, ApiError> {
        let input = validate_signup(req)?;
        let token = CredentialCodec::derive(&input.password, &input.name);

        let id = accounts.sign_up(&input.name, &token).await.map_err(|e| {
            if matches!(e, StoreError::AlreadyExists) {
                info!(name = %input.name, "The given name already exists");
            }
            e
        })?;

        metrics::counter!("workout_service_signups_total").increment(1);
        info!(name = %input.name, user_id = id, "Added new user");

        Ok(SignupResponse { id, token })
    }

    /// Log in with name and password or with a token, returning the user and
    /// all of their workouts
    pub async fn login(
        accounts: &dyn AccountStore,
        workouts: &dyn WorkoutStore,
        req: &UserRequest,
    ) -> Result<LoginResponse, ApiError> {
        let (user, method) = match validate_login(req)? {
            LoginCredentials::Password { name, password } => {
                let token = CredentialCodec::derive(&password, &name);
                let user = accounts.login_with_credentials(&name, &token).await?;
                (user, "password")
            }
            LoginCredentials::Token(token) => {
                let user = accounts.login_with_token(&token).await.map_err(|e| match e {
                    StoreError::NotFound => ApiError::NotFound(
                        "The given token did not match any users".to_string(),
                    ),
                    other => other.into(),
                })?;
                (user, "token")
            }
        };

        metrics::counter!("workout_service_logins_total", "method" => method).increment(1);
        info!(name = %user.name, method, "User signed in");

        let workouts = workouts
            .get_workouts(user.id)
            .await?
            .iter()
            .map(WorkoutResponse::from)
            .collect();

        Ok(LoginResponse { user, workouts })
    }
}
