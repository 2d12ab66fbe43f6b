//! Auth Middleware
//!
//! One declarative guard for every protected route: `authorize` validates
//! the bearer token, checks the session's role against the permitted set,
//! and hands the principal to downstream handlers via request extensions.
//! Routes differ only in the role set they pass, never in the logic.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use platform::bearer::extract_bearer;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRegistry;
use crate::domain::value_object::{UserName, UserRole};
use crate::error::AuthError;

/// Roles permitted to write event records
pub const EDITOR_ROLES: &[UserRole] = &[UserRole::Admin, UserRole::Editor];

/// Roles permitted for destructive and user-management operations
pub const ADMIN_ONLY: &[UserRole] = &[UserRole::Admin];

/// Authenticated principal stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: UserName,
    /// Role snapshotted at login, not the account's current role
    pub role: UserRole,
}

/// Guard state: the session registry plus the permitted role set
pub struct RoleGuard<S>
where
    S: SessionRegistry,
{
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
    /// Empty set means "any authenticated caller"
    pub allowed: &'static [UserRole],
}

impl<S> RoleGuard<S>
where
    S: SessionRegistry,
{
    pub fn new(sessions: Arc<S>, config: Arc<AuthConfig>, allowed: &'static [UserRole]) -> Self {
        Self {
            sessions,
            config,
            allowed,
        }
    }

    /// Same registry and config, different permitted set
    pub fn with_roles(&self, allowed: &'static [UserRole]) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            allowed,
        }
    }
}

impl<S> Clone for RoleGuard<S>
where
    S: SessionRegistry,
{
    fn clone(&self) -> Self {
        Self {
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            allowed: self.allowed,
        }
    }
}

/// Middleware that requires a valid session with a permitted role
///
/// - missing/malformed/unknown token -> 401
/// - expired session -> 401 (and the session is evicted)
/// - authenticated but role not in the set -> 403
pub async fn authorize<S>(
    State(guard): State<RoleGuard<S>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError>
where
    S: SessionRegistry + Send + Sync + 'static,
{
    let token = extract_bearer(req.headers()).ok_or(AuthError::Unauthorized)?;

    let use_case = CheckSessionUseCase::new(guard.sessions.clone(), guard.config.clone());
    let session = use_case.execute(&token).await?;

    if !guard.allowed.is_empty() && !guard.allowed.contains(&session.role) {
        tracing::debug!(
            username = %session.username,
            role = %session.role,
            "Role not permitted for this operation"
        );
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(CurrentUser {
        username: session.username,
        role: session.role,
    });

    Ok(next.run(req).await)
}
