//! Sign Out Use Case
//!
//! Revokes a session. Idempotent: signing out an already-dead session is
//! not an error, the token is stale either way.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::repository::SessionRegistry;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRegistry,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRegistry,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    pub async fn execute(&self, bearer_token: &str) -> AuthResult<()> {
        let session_id = token::parse(&self.config.session_secret, bearer_token)
            .ok_or(AuthError::Unauthorized)?;

        self.sessions.revoke(&session_id).await?;

        tracing::info!("User signed out");
        Ok(())
    }
}
