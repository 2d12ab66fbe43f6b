//! Repository Trait
//!
//! Persistence interface for hackathon records; the SQLite implementation
//! lives in the infrastructure layer.

use kernel::id::HackathonId;

use crate::domain::hackathon::Hackathon;
use crate::error::EventResult;

/// Hackathon record store trait
#[trait_variant::make(HackathonRepository: Send)]
pub trait LocalHackathonRepository {
    /// Persist a new record
    async fn insert(&self, record: &Hackathon) -> EventResult<()>;

    /// Find a record by id. A miss is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: &HackathonId) -> EventResult<Option<Hackathon>>;

    /// Persist changes to an existing record. Fails with `NotFound` if
    /// absent.
    async fn update(&self, record: &Hackathon) -> EventResult<()>;

    /// Delete a record. Fails with `NotFound` if absent.
    async fn delete(&self, id: &HackathonId) -> EventResult<()>;

    /// All records, newest first
    async fn list_newest_first(&self) -> EventResult<Vec<Hackathon>>;
}
