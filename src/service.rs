//! Orchestration shared by every transport.
//!
//! Adapters own a `SessionService` and translate their inputs into these
//! calls; the session logic itself lives in `session`.

use std::collections::HashMap;

use crate::challenge::ChallengeCatalog;
use crate::error::{Result, ThumpError};
use crate::session::{Session, TickOutcome};
use crate::stats::ResultSink;
use crate::store::{SessionId, SessionStore};

pub struct SessionService<S: SessionStore, R: ResultSink> {
    store: S,
    sink: R,
    catalog: ChallengeCatalog,
    users: HashMap<SessionId, String>,
}

impl<S: SessionStore, R: ResultSink> SessionService<S, R> {
    pub fn new(store: S, sink: R, catalog: ChallengeCatalog) -> Self {
        Self {
            store,
            sink,
            catalog,
            users: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &ChallengeCatalog {
        &self.catalog
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Create (or recreate) a session seeded at rest
    pub fn start(&mut self, id: &str, user: &str) -> Result<&Session> {
        if self.store.put(id.to_string(), Session::new()).is_some() {
            tracing::debug!(session = id, "restarted session");
        } else {
            tracing::info!(session = id, user, "started session");
        }
        self.users.insert(id.to_string(), user.to_string());
        self.snapshot(id)
    }

    pub fn snapshot(&self, id: &str) -> Result<&Session> {
        self.store
            .get(id)
            .ok_or_else(|| ThumpError::SessionNotFound(id.to_string()))
    }

    fn session_mut(&mut self, id: &str) -> Result<&mut Session> {
        self.store
            .get_mut(id)
            .ok_or_else(|| ThumpError::SessionNotFound(id.to_string()))
    }

    pub fn attach_challenge(&mut self, id: &str, challenge_id: &str) -> Result<&Session> {
        let definition = self
            .catalog
            .get(challenge_id)
            .cloned()
            .ok_or_else(|| ThumpError::UnknownChallenge(challenge_id.to_string()))?;
        self.session_mut(id)?.attach_challenge(definition)?;
        tracing::info!(session = id, challenge = challenge_id, "attached challenge");
        self.snapshot(id)
    }

    pub fn detach(&mut self, id: &str) -> Result<&Session> {
        self.session_mut(id)?.detach();
        self.snapshot(id)
    }

    pub fn set_intensity(&mut self, id: &str, intensity: &str) -> Result<&Session> {
        self.session_mut(id)?.set_intensity(intensity);
        self.snapshot(id)
    }

    /// Stop ticking without discarding state
    pub fn stop(&mut self, id: &str) -> Result<&Session> {
        self.session_mut(id)?.pause();
        self.snapshot(id)
    }

    pub fn resume(&mut self, id: &str) -> Result<&Session> {
        self.session_mut(id)?.resume();
        self.snapshot(id)
    }

    /// Tick a session; a completed challenge is handed to the sink once.
    pub fn tick(&mut self, id: &str, delta_ms: f64) -> Result<(TickOutcome, &Session)> {
        let outcome = self.session_mut(id)?.tick(delta_ms)?;

        if let TickOutcome::Completed(result) = &outcome {
            let user = self.users.get(id).map(String::as_str).unwrap_or("local");
            tracing::info!(
                session = id,
                challenge = %result.challenge_id,
                grade = %result.grade,
                time_in_zone = result.time_achieved,
                "challenge completed"
            );
            if let Err(e) = self.sink.record_result(user, result) {
                tracing::error!(session = id, "failed to persist result: {}", e);
            }
        }

        Ok((outcome, self.snapshot(id)?))
    }

    /// Tear down a session
    pub fn end(&mut self, id: &str) -> Result<Session> {
        self.users.remove(id);
        let session = self
            .store
            .remove(id)
            .ok_or_else(|| ThumpError::SessionNotFound(id.to_string()))?;
        tracing::info!(session = id, "ended session");
        Ok(session)
    }
}
