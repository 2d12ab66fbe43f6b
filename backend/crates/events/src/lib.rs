//! Events Backend Module
//!
//! CRUD over hackathon event records. This crate is deliberately thin:
//! records are free-form documents with a name, and the interesting part
//! is the authorization surface in front of them — reading is public,
//! writing requires an editor or admin session, deletion requires admin.
//!
//! Same layering as the auth crate:
//! - `domain/` - Record entity and repository trait
//! - `infra/` - SQLite implementation
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{EventError, EventResult};
pub use infra::sqlite::SqliteHackathonRepository;
pub use presentation::router::events_router;

pub mod models {
    pub use crate::domain::hackathon::*;
    pub use crate::presentation::dto::*;
}
