//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer: credentials in SQLite, sessions in process memory.
//! Both are injected, so either backing store can be swapped without
//! touching the use cases.

use crate::domain::entity::{Session, User, UserSummary};
use crate::domain::value_object::UserName;
use crate::error::AuthResult;

/// Credential store trait
///
/// The durable mapping username -> hashed credential + role + metadata.
/// Any write must be durable before the call returns.
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user. Fails with `UserNameTaken` if the username
    /// exists; uniqueness is enforced atomically by the store, not by a
    /// read-then-write check.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by username. A miss is `Ok(None)`, not an error.
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Persist changes to an existing user (password/role and the
    /// modified-by stamps). Fails with `UserNotFound` if absent.
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Delete a user, appending exactly one audit entry in the same
    /// transaction. Fails with `UserNotFound` if absent (and appends
    /// nothing).
    async fn delete(&self, username: &UserName, actor: &UserName) -> AuthResult<()>;

    /// All users, password material stripped
    async fn list_all(&self) -> AuthResult<Vec<UserSummary>>;
}

/// Session registry trait
///
/// Process-lifetime mapping session id -> session. Memory-resident by
/// design: every session dies with the process, which is accepted at this
/// scale. `lookup` is a plain read; expiry is detected at use by the
/// validation path, which evicts through `revoke`.
#[trait_variant::make(SessionRegistry: Send)]
pub trait LocalSessionRegistry {
    /// Store a freshly issued session
    async fn issue(&self, session: Session) -> AuthResult<()>;

    /// Find a session by id
    async fn lookup(&self, session_id: &str) -> AuthResult<Option<Session>>;

    /// Remove a session; idempotent
    async fn revoke(&self, session_id: &str) -> AuthResult<()>;
}
