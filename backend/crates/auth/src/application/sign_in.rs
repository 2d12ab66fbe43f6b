//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::Session;
use crate::domain::repository::{SessionRegistry, UserRepository};
use crate::domain::value_object::{UserName, UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
    /// "Remember me" flag; stretches the session TTL from hours to days
    pub remember: bool,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed bearer token for the Authorization header
    pub token: String,
    /// Role snapshotted into the session
    pub role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRegistry,
{
    users: Arc<U>,
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRegistry,
{
    pub fn new(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users,
            sessions,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Every failure before the session is issued maps to the same
        // InvalidCredentials so responses cannot enumerate usernames.
        let username =
            UserName::new(input.username).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        // Argon2 verification is memory-hard; keep it off the request
        // threads.
        let hash = user.password_hash.clone();
        let pepper = self.config.password_pepper.clone();
        let password_valid =
            tokio::task::spawn_blocking(move || hash.verify(&password, pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(format!("verify task failed: {e}")))??;

        if !password_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let ttl = if input.remember {
            self.config.session_ttl_long
        } else {
            self.config.session_ttl_short
        };
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| AuthError::Internal(format!("invalid session TTL: {e}")))?;

        let session = Session::new(user.username.clone(), user.role, input.remember, ttl);
        self.sessions.issue(session.clone()).await?;

        let token = token::sign(&self.config.session_secret, &session.session_id);

        tracing::info!(
            username = %user.username,
            role = %user.role,
            persistent = input.remember,
            "User signed in"
        );

        Ok(SignInOutput {
            token,
            role: user.role,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
