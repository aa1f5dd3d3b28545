//! # Session Store
//!
//! In-process store mapping opaque session tokens to authenticated
//! identities. Login and registration insert an identity and hand the token
//! to the client; logout removes it, completing the
//! Unknown → Authenticated → Anonymous lifecycle of the session state
//! machine in `wakesync-core`.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;
use wakesync_core::models::session::SessionIdentity;

/// Token-indexed session storage shared across handlers via `ApiState`.
///
/// Only authenticated identities are ever stored; resolving an unknown token
/// yields `None` and the caller maps that to an authorization failure.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionIdentity>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an authenticated identity under a fresh opaque token.
    pub async fn insert(&self, identity: SessionIdentity) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, identity);
        token
    }

    /// Resolves a token to its identity, if the session is still live.
    pub async fn get(&self, token: Uuid) -> Option<SessionIdentity> {
        self.sessions.read().await.get(&token).cloned()
    }

    /// Removes a session. Returns whether a live session was ended.
    pub async fn remove(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }
}
