//! In-Memory Session Registry
//!
//! Process-lifetime session storage behind an `RwLock<HashMap>`. Restarting
//! the process drops every session; callers simply log in again. The trait
//! boundary keeps this swappable for a shared store if the service ever
//! needs more than one process.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::Session;
use crate::domain::repository::SessionRegistry;
use crate::error::AuthResult;

/// Memory-backed session registry
#[derive(Clone, Default)]
pub struct MemorySessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl MemorySessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries (expired but unevicted ones included)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl SessionRegistry for MemorySessionRegistry {
    async fn issue(&self, session: Session) -> AuthResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.session_id.clone(), session);
        Ok(())
    }

    async fn lookup(&self, session_id: &str) -> AuthResult<Option<Session>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn revoke(&self, session_id: &str) -> AuthResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
