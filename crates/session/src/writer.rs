//! The unique mutation capability for a session store.

use std::rc::Rc;

use wicket_core::{Identity, SessionState};

use crate::store::StoreShared;

/// Mutation entry points for the external authentication collaborator.
///
/// Exactly one writer exists per store and it is not `Clone`: the
/// single-writer discipline is what lets every reader rely on in-order,
/// same-turn change delivery without any locking protocol.
///
/// All operations are infallible. Authentication IO (network, credential
/// storage) lives with the collaborator driving this handle; failures
/// over there surface here as plain transitions to
/// [`SessionState::SignedOut`].
pub struct SessionWriter {
    shared: Rc<StoreShared>,
}

impl SessionWriter {
    pub(crate) fn new(shared: Rc<StoreShared>) -> Self {
        Self { shared }
    }

    /// Record a successful sign-in, or a restoration that found a
    /// resumable session.
    pub fn sign_in(&self, identity: Identity) {
        self.shared.set(SessionState::SignedIn(identity));
    }

    /// Record sign-out or session expiry.
    pub fn sign_out(&self) {
        self.shared.set(SessionState::SignedOut);
    }

    /// Start a new session-restoration attempt.
    ///
    /// This is the only path back into [`SessionState::Restoring`]; a
    /// settled state never reverts on its own.
    pub fn begin_restore(&self) {
        self.shared.set(SessionState::Restoring);
    }

    /// Settle a restoration attempt either way.
    pub fn resolve_restore(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => self.sign_in(identity),
            None => self.sign_out(),
        }
    }
}

impl core::fmt::Debug for SessionWriter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionWriter")
            .field("state", &self.shared.current())
            .finish_non_exhaustive()
    }
}
