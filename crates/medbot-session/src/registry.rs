use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use medbot_instruments::Catalog;

use crate::error::SessionError;
use crate::session::Session;

/// Active sessions keyed by user identity, at most one per user.
///
/// The registry is a plain owned value; callers that share it between tasks
/// wrap it in their own lock so that each user's session is read, mutated and
/// answered under exclusion.
#[derive(Debug)]
pub struct SessionRegistry {
    catalog: Arc<Catalog>,
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            sessions: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Start a session on the first test whose name contains `needle`.
    ///
    /// An existing session for the user is replaced.
    pub fn start_session(
        &mut self,
        user_id: impl Into<String>,
        needle: &str,
    ) -> Result<&mut Session, SessionError> {
        self.start_session_replacing(user_id, needle)
            .map(|(session, _)| session)
    }

    /// Like [`SessionRegistry::start_session`], also handing back the session
    /// that was replaced so the caller can report it.
    pub fn start_session_replacing(
        &mut self,
        user_id: impl Into<String>,
        needle: &str,
    ) -> Result<(&mut Session, Option<Session>), SessionError> {
        let test = self
            .catalog
            .find(needle)
            .cloned()
            .ok_or_else(|| SessionError::TestNotFound {
                needle: needle.to_string(),
            })?;
        let user_id = user_id.into();
        let session = Session::new(test);
        tracing::debug!(
            user_id = %user_id,
            session_id = %session.id(),
            test = %session.test().name(),
            "session created"
        );

        Ok(match self.sessions.entry(user_id) {
            Entry::Occupied(mut entry) => {
                let replaced = entry.insert(session);
                tracing::info!(
                    user_id = %entry.key(),
                    replaced_session = %replaced.id(),
                    replaced_test = %replaced.test().name(),
                    answered = replaced.collected_scores().len(),
                    "active session replaced by a new one"
                );
                (entry.into_mut(), Some(replaced))
            }
            Entry::Vacant(entry) => (entry.insert(session), None),
        })
    }

    pub fn get_session(&self, user_id: &str) -> Option<&Session> {
        self.sessions.get(user_id)
    }

    pub fn get_session_mut(&mut self, user_id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(user_id)
    }

    pub fn require_session_mut(&mut self, user_id: &str) -> Result<&mut Session, SessionError> {
        self.sessions
            .get_mut(user_id)
            .ok_or_else(|| SessionError::SessionNotFound {
                user_id: user_id.to_string(),
            })
    }

    /// Remove and return the user's session.
    pub fn take_session(&mut self, user_id: &str) -> Option<Session> {
        self.sessions.remove(user_id)
    }

    /// Returns `true` if a session existed. Removing an absent session is a no-op.
    pub fn remove_session(&mut self, user_id: &str) -> bool {
        self.take_session(user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
