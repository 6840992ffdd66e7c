use std::collections::HashMap;

use crate::session::Session;

/// Opaque key a transport uses to find its session
pub type SessionId = String;

/// Keyed storage for live sessions, injected into transport adapters
pub trait SessionStore {
    fn get(&self, id: &str) -> Option<&Session>;
    fn get_mut(&mut self, id: &str) -> Option<&mut Session>;
    /// Insert or replace, returning the previous session
    fn put(&mut self, id: SessionId, session: Session) -> Option<Session>;
    fn remove(&mut self, id: &str) -> Option<Session>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store for a single process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    fn put(&mut self, id: SessionId, session: Session) -> Option<Session> {
        self.sessions.insert(id, session)
    }

    fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}
