//! Scoped listener registration.

use std::rc::Weak;

use crate::store::{ListenerId, StoreShared};

/// Guard for a registered session listener.
///
/// Cancelling (or dropping) the guard permanently deregisters the
/// listener; no notification is delivered afterwards. `cancel` is
/// idempotent: a second call is a no-op, not an error.
///
/// The guard holds only a weak reference to the store, so it may safely
/// outlive it.
#[derive(Debug)]
pub struct Subscription {
    store: Weak<StoreShared>,
    id: ListenerId,
    cancelled: bool,
}

impl Subscription {
    pub(crate) fn new(store: Weak<StoreShared>, id: ListenerId) -> Self {
        Self {
            store,
            id,
            cancelled: false,
        }
    }

    /// Deregister the listener. Safe to call more than once.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.id);
        }
    }

    /// Whether the guard has already been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
