//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Store implementations (SQLite credentials, in-memory sessions)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Login/registration with username + password
//! - Bearer-token sessions held in process memory (lost on restart)
//! - Role-based access (Admin, Editor, Member) via a single route guard
//! - Admin user management with an append-only audit trail for deletions
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, verified off the request thread
//! - Session ids carry 256 bits of entropy and an HMAC-SHA256 signature
//! - A session's role is snapshotted at login; later role changes do not
//!   affect tokens already issued
//! - Login failures never reveal whether the username exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemorySessionRegistry;
pub use infra::sqlite::SqliteUserRepository;
pub use presentation::middleware::{ADMIN_ONLY, EDITOR_ROLES, CurrentUser, RoleGuard, authorize};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
