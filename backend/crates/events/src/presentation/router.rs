//! Events Router
//!
//! Three tiers on one resource: reads are public, writes sit behind the
//! editor guard, deletion behind the admin guard. The guards are the same
//! declarative middleware the auth crate uses for its own admin block.

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use auth::domain::repository::SessionRegistry;
use auth::middleware::{ADMIN_ONLY, EDITOR_ROLES, RoleGuard, authorize};

use crate::domain::repository::HackathonRepository;
use crate::presentation::handlers::{self, EventsAppState};

/// Create the events router
///
/// `guard` carries the session registry and config; the permitted role
/// sets are chosen per route tier here.
pub fn events_router<R, S>(records: Arc<R>, guard: RoleGuard<S>) -> Router
where
    R: HackathonRepository + Clone + Send + Sync + 'static,
    S: SessionRegistry + Clone + Send + Sync + 'static,
{
    let state = EventsAppState { records };

    let public_routes = Router::new()
        .route("/", get(handlers::list::<R>))
        .route("/{id}", get(handlers::get_one::<R>))
        .with_state(state.clone());

    let editor_routes = Router::new()
        .route("/", post(handlers::create::<R>))
        .route("/{id}", put(handlers::update::<R>))
        .route_layer(middleware::from_fn_with_state(
            guard.with_roles(EDITOR_ROLES),
            authorize::<S>,
        ))
        .with_state(state.clone());

    let admin_routes = Router::new()
        .route("/{id}", delete(handlers::remove::<R>))
        .route_layer(middleware::from_fn_with_state(
            guard.with_roles(ADMIN_ONLY),
            authorize::<S>,
        ))
        .with_state(state);

    public_routes.merge(editor_routes).merge(admin_routes)
}
