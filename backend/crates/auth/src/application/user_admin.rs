//! User Administration Use Case
//!
//! Admin-only account management: listing, creation with an explicit role,
//! password/role updates, and deletion with its audit side effect. The
//! acting principal comes from the caller's authorized session and is
//! stamped onto every mutation.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::{User, UserSummary};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserName, UserRole};
use crate::error::{AuthError, AuthResult};

/// Input for admin user creation
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

/// Patch for admin user updates; only password and role are mutable
#[derive(Default)]
pub struct UpdateUserInput {
    pub password: Option<String>,
    pub role: Option<UserRole>,
}

/// User administration use case
pub struct UserAdminUseCase<U>
where
    U: UserRepository,
{
    users: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> UserAdminUseCase<U>
where
    U: UserRepository,
{
    pub fn new(users: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { users, config }
    }

    /// All accounts, password material stripped at the repository boundary
    pub async fn list(&self) -> AuthResult<Vec<UserSummary>> {
        self.users.list_all().await
    }

    /// Create an account with an explicit role
    pub async fn create(&self, actor: &UserName, input: CreateUserInput) -> AuthResult<User> {
        let username =
            UserName::new(input.username).map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::InvalidInput(e.to_string()))?;

        let pepper = self.config.password_pepper.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
                .await
                .map_err(|e| AuthError::Internal(format!("hash task failed: {e}")))??;

        let user = User::created_by_admin(username, password_hash, input.role, actor);
        self.users.create(&user).await?;

        tracing::info!(
            username = %user.username,
            role = %user.role,
            actor = %actor,
            "User created by admin"
        );

        Ok(user)
    }

    /// Update password and/or role
    pub async fn update(
        &self,
        actor: &UserName,
        username: &str,
        patch: UpdateUserInput,
    ) -> AuthResult<User> {
        if patch.password.is_none() && patch.role.is_none() {
            return Err(AuthError::InvalidInput("nothing to update".to_string()));
        }

        let username =
            UserName::new(username).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .users
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(password) = patch.password {
            let password = ClearTextPassword::new(password)
                .map_err(|e| AuthError::InvalidInput(e.to_string()))?;
            let pepper = self.config.password_pepper.clone();
            let password_hash =
                tokio::task::spawn_blocking(move || password.hash(pepper.as_deref()))
                    .await
                    .map_err(|e| AuthError::Internal(format!("hash task failed: {e}")))??;
            user.set_password(password_hash, actor);
        }

        if let Some(role) = patch.role {
            user.set_role(role, actor);
        }

        self.users.update(&user).await?;

        tracing::info!(
            username = %user.username,
            role = %user.role,
            actor = %actor,
            "User updated by admin"
        );

        Ok(user)
    }

    /// Delete an account; the repository appends the audit entry in the
    /// same transaction
    pub async fn delete(&self, actor: &UserName, username: &str) -> AuthResult<()> {
        let username =
            UserName::new(username).map_err(|_| AuthError::UserNotFound)?;

        self.users.delete(&username, actor).await?;

        tracing::info!(
            username = %username,
            actor = %actor,
            "User deleted by admin"
        );

        Ok(())
    }
}
