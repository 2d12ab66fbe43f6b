//! Check Session Use Case
//!
//! Verifies a bearer token and retrieves its session. This is the only
//! consumer of the registry's `lookup`, and the place where lazy expiry
//! happens: an expired session is evicted on first use, so the next
//! presentation of the same token fails exactly like an unknown one.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::Session;
use crate::domain::repository::SessionRegistry;
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRegistry,
{
    sessions: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRegistry,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self { sessions, config }
    }

    /// Resolve a bearer token to its live session
    ///
    /// - `Unauthorized` for malformed/forged tokens and unknown ids
    /// - `SessionExpired` when the session existed but is past expiry;
    ///   the entry is revoked as a side effect
    pub async fn execute(&self, bearer_token: &str) -> AuthResult<Session> {
        let session_id = token::parse(&self.config.session_secret, bearer_token)
            .ok_or(AuthError::Unauthorized)?;

        let session = self
            .sessions
            .lookup(&session_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if session.is_expired() {
            self.sessions.revoke(&session.session_id).await?;
            tracing::debug!(username = %session.username, "Evicted expired session");
            return Err(AuthError::SessionExpired);
        }

        Ok(session)
    }
}
