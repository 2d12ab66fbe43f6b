//! Router Composition
//!
//! Builds the full application router from a database pool and auth
//! config. Kept apart from `main` so tests can drive the exact same
//! surface without binding a socket.

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;

use auth::{AuthConfig, MemorySessionRegistry, SqliteUserRepository, auth_router, middleware::RoleGuard};
use events::{SqliteHackathonRepository, events_router};

/// Build the `/api` application router
pub fn build_app(pool: SqlitePool, config: AuthConfig) -> Router {
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let sessions = Arc::new(MemorySessionRegistry::new());
    let config = Arc::new(config);
    let records = Arc::new(SqliteHackathonRepository::new(pool));

    // The events router picks its own role sets per tier
    let guard = RoleGuard::new(sessions.clone(), config.clone(), &[]);

    let api = Router::new()
        .route("/health", get(health))
        .merge(auth_router(users, sessions, config))
        .nest("/hackathons", events_router(records, guard));

    Router::new().nest("/api", api)
}

/// GET /api/health
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
