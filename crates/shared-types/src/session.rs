use crate::ProfileKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-visible view of an authenticated session.
///
/// The tokens themselves stay in HTTP-only cookies on the server; the UI
/// only needs to know that a session exists and whose it is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Why the identity provider emitted a session change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionEventKind {
    SignedIn,
    SignedOut,
}

/// A session change as delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionEvent {
    pub kind: SessionEventKind,
    pub session: Option<Session>,
}

impl SessionEvent {
    pub fn signed_in(session: Session) -> Self {
        Self {
            kind: SessionEventKind::SignedIn,
            session: Some(session),
        }
    }

    pub fn signed_out() -> Self {
        Self {
            kind: SessionEventKind::SignedOut,
            session: None,
        }
    }
}

/// Value held by the session state holder.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: Option<Session>,
    pub loading: bool,
    /// Incremented on initial resolution and on every session event.
    /// Scopes the profile cache.
    pub generation: u64,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionSnapshot {
    /// State before the initial session lookup completes.
    pub fn initial() -> Self {
        Self {
            session: None,
            loading: true,
            generation: 0,
        }
    }

    /// Apply the outcome of the initial lookup. A failed lookup is passed
    /// as `None`. Only the first call has an effect; returns whether it did.
    pub fn resolve_initial(&mut self, session: Option<Session>) -> bool {
        if !self.loading {
            return false;
        }
        self.session = session;
        self.loading = false;
        self.generation += 1;
        true
    }

    /// Replace the held session with the one carried by `event`.
    /// Last write wins; nothing is merged.
    pub fn apply(&mut self, event: &SessionEvent) {
        self.session = event.session.clone();
        self.generation += 1;
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Key under which the profile for this session is cached, if any.
    pub fn profile_key(&self) -> Option<ProfileKey> {
        self.session.as_ref().map(|s| ProfileKey {
            user_id: s.user_id,
            generation: self.generation,
        })
    }
}
