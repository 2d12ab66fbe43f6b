//! Sign Up Use Case
//!
//! Creates a new user account through public self-registration.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserName, UserRole};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub username: String,
    pub password: String,
    /// Advisory request for admin privileges; stored, never honored here
    pub request_admin: bool,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub username: String,
    pub role: UserRole,
    pub request_admin: bool,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { users, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let username =
            UserName::new(input.username).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let pepper = self.config.password_pepper.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(format!("hash task failed: {e}")))??;

        // Registration always yields a Member. Duplicate usernames are
        // settled by the store's unique constraint, so two concurrent
        // registrations cannot both win.
        let user = User::register(username, password_hash, input.request_admin);
        self.users.create(&user).await?;

        tracing::info!(
            username = %user.username,
            request_admin = user.request_admin,
            "User registered"
        );

        Ok(SignUpOutput {
            username: user.username.as_str().to_string(),
            role: user.role,
            request_admin: user.request_admin,
        })
    }
}
