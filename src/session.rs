//! In-memory session layer.
//!
//! Each session owns its conversational state behind its own lock. A turn
//! holds that lock from reading the state until the new state is written, so
//! turns of one session run one at a time while different sessions never
//! contend.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dispatch::{ConversationState, DispatchEngine, TurnOutcome};
use crate::error::{HavenError, Result};

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
        fmt::Display::fmt(&self.0, f)
    }
}

/// Sessions and their conversational state.
#[derive(Debug)]
pub struct SessionStore {
    engine: DispatchEngine,
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<ConversationState>>>>,
}

impl SessionStore {
    pub fn new(engine: DispatchEngine) -> Self {
        SessionStore {
            engine,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a session in the idle state.
    pub fn start(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .write()
            .insert(id, Arc::new(Mutex::new(ConversationState::Idle)));
        debug!("session {id} started");
        id
    }

    /// Run one turn of a session.
    pub fn turn(&self, id: SessionId, utterance: &str) -> Result<TurnOutcome> {
        let slot = self.slot(id)?;
        let mut state = slot.lock();
        let outcome = self.engine.handle_turn(utterance, *state);
        *state = outcome.state;
        Ok(outcome)
    }

    /// Run one turn from a raw transport message.
    pub fn message(&self, id: SessionId, message: &serde_json::Value) -> Result<TurnOutcome> {
        let slot = self.slot(id)?;
        let mut state = slot.lock();
        let outcome = self.engine.handle_message(message, *state);
        *state = outcome.state;
        Ok(outcome)
    }

    /// Current state of a session.
    pub fn state(&self, id: SessionId) -> Result<ConversationState> {
        Ok(*self.slot(id)?.lock())
    }

    /// Close a session, discarding its state.
    pub fn end(&self, id: SessionId) -> bool {
        let removed = self.sessions.write().remove(&id).is_some();
        if removed {
            debug!("session {id} ended");
        }
        removed
    }

    /// Number of open sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn engine(&self) -> &DispatchEngine {
        &self.engine
    }

    fn slot(&self, id: SessionId) -> Result<Arc<Mutex<ConversationState>>> {
        self.sessions
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| HavenError::session(format!("Unknown session {id}")))
    }
}
