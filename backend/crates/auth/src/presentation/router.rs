//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{SessionRegistry, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{ADMIN_ONLY, RoleGuard, authorize};

/// Create the auth router for any repository/registry implementation
///
/// Public routes (login/register/logout/validate) carry no guard; the user
/// management block sits behind the admin role guard.
pub fn auth_router<U, S>(users: Arc<U>, sessions: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        users,
        sessions: sessions.clone(),
        config: config.clone(),
    };

    let admin_guard = RoleGuard::new(sessions, config, ADMIN_ONLY);

    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::list_users::<U, S>).post(handlers::create_user::<U, S>),
        )
        .route(
            "/users/{username}",
            put(handlers::update_user::<U, S>).delete(handlers::delete_user::<U, S>),
        )
        .route_layer(middleware::from_fn_with_state(admin_guard, authorize::<S>))
        .with_state(state.clone());

    Router::new()
        .route("/login", post(handlers::login::<U, S>))
        .route("/register", post(handlers::register::<U, S>))
        .route("/logout", post(handlers::logout::<U, S>))
        .route("/validate", get(handlers::validate::<U, S>))
        .with_state(state)
        .merge(admin_routes)
}
