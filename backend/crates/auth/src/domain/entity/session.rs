//! Session Entity
//!
//! An authenticated session held in the process-memory registry and
//! referenced by a signed bearer token. Sessions are never rotated: the
//! same id is presented on every request until expiry or logout.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{UserName, UserRole};

/// Random bytes in a session id (256 bits)
pub const SESSION_ID_BYTES: usize = 32;

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque id, base64url over [`SESSION_ID_BYTES`] of OS randomness
    pub session_id: String,
    /// Owning account
    pub username: UserName,
    /// Role at login time. Authoritative for the whole session lifetime,
    /// even if the account's role changes afterwards.
    pub role: UserRole,
    /// Whether "remember me" semantics were requested at login
    pub persistent: bool,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded
    /// here.
    pub fn new(username: UserName, role: UserRole, persistent: bool, ttl: Duration) -> Self {
        let now = Utc::now();
        let session_id = platform::crypto::to_base64_url(&platform::crypto::random_bytes(
            SESSION_ID_BYTES,
        ));

        Self {
            session_id,
            username,
            role,
            persistent,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }
}
