//! Session snapshot shared with observers.
//!
//! The store owns the only mutable copy; everyone else sees clones handed out
//! by `SessionStore::current_session` or passed to subscribers.

use crate::identity::Identity;

/// Whether an identity is active, plus initialization status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    /// Current identity, `None` when signed out.
    pub identity: Option<Identity>,
    /// True only until the first storage read completes.
    pub is_initializing: bool,
    /// True while at least one login/signup/federated call is outstanding.
    pub busy: bool,
}

impl Default for Session {
    /// The startup state: no identity, restoration pending.
    fn default() -> Self {
        Self { identity: None, is_initializing: true, busy: false }
    }
}

/// Coarse lifecycle state derived from a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Authenticated,
    Anonymous,
}

impl Session {
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        if self.is_initializing {
            SessionStatus::Initializing
        } else if self.identity.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        }
    }
}
