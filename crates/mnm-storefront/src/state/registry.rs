//! # Session Registry
//!
//! Independent container sessions keyed by id. Two containers on one page
//! never share a selection; closing one leaves the others alone.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::session::{ContainerSession, SessionState};
use crate::error::{StorefrontError, StorefrontResult};

/// Identifier of one open container session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|_| StorefrontError::SessionNotFound(s.to_string()))
    }
}

/// All open sessions.
///
/// Cheap to clone; clones share the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, SessionState>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session and returns its new id.
    pub fn open(&self, session: ContainerSession) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, SessionState::new(session));

        info!(session_id = %id, "Container session opened");
        id
    }

    /// Looks up a session.
    pub fn get(&self, id: SessionId) -> StorefrontResult<SessionState> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| StorefrontError::SessionNotFound(id.to_string()))
    }

    /// Drops a session. Returns false if it was not open.
    pub fn close(&self, id: SessionId) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();

        debug!(session_id = %id, removed, "Container session closed");
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
