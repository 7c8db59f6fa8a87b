//! The session record and the phases derived from it.

use std::fmt;

use crate::SessionError;

/// The client's view of who is logged in.
///
/// ```text
///   Anonymous ──(login)──→ Authenticating ──(success)──→ Authenticated
///       ↑                       │                          │      ↑
///       └──────(failure)────────┘                   (logout)  (failure)
///       │                                                  ↓      │
///       └───────────────────(success)─────────────── LoggingOut ──┘
/// ```
///
/// Only [`AuthState`](crate::AuthState) writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Nickname of the logged-in player.
    pub user: Option<String>,
    /// `true` while a login or logout is in flight.
    pub is_loading: bool,
    /// Errors of the most recent operation, in the order reported.
    pub errors: Vec<SessionError>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The state-machine phase implied by the attributes alone.
    ///
    /// This never returns [`AuthPhase::StaleIdentity`]: telling that
    /// apart from `Authenticated` needs the credential store, see
    /// [`AuthState::phase`](crate::AuthState::phase).
    pub fn phase(&self) -> AuthPhase {
        match (self.user.is_some(), self.is_loading) {
            (false, false) => AuthPhase::Anonymous,
            (false, true) => AuthPhase::Authenticating,
            (true, false) => AuthPhase::Authenticated,
            (true, true) => AuthPhase::LoggingOut,
        }
    }
}

/// Named phases of the auth state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthPhase {
    Anonymous,
    Authenticating,
    Authenticated,
    LoggingOut,
    /// A user is set but the store holds no credential. This is where a
    /// failed logout lands: the token was cleared up front and the server
    /// call then failed.
    StaleIdentity,
}

impl fmt::Display for AuthPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::LoggingOut => "logging out",
            Self::StaleIdentity => "stale identity",
        };
        f.write_str(name)
    }
}
