//! Session state: the authoritative description of "who is signed in".

use serde::{Deserialize, Serialize};

use crate::identity::Identity;

/// Current authentication status of a running client.
///
/// One tagged value instead of an `(identity, loading)` pair. The pair
/// admits a loading flag alongside a stale identity, and no access
/// decision may ever read that combination; the variant form makes it
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "identity", rename_all = "snake_case")]
pub enum SessionState {
    /// A session-restoration attempt is in flight; identity is not yet
    /// authoritative.
    Restoring,

    /// Restoration, sign-out or expiry settled with no identity.
    ///
    /// "Never signed in", "signed out" and "session expired" are
    /// deliberately indistinguishable here: the gate is a presence check,
    /// not a diagnostic surface.
    SignedOut,

    /// A user is authenticated.
    SignedIn(Identity),
}

impl SessionState {
    /// Whether the restoration attempt has settled either way.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Restoring)
    }

    /// Whether an authenticated identity is present.
    ///
    /// Always `false` while restoring: an unsettled identity must not
    /// drive access decisions.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::SignedIn(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedIn(identity) => Some(identity),
            _ => None,
        }
    }
}
