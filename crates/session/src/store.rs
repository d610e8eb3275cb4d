//! The session store: observable authentication state for one client.
//!
//! Delivery model:
//!
//! ```text
//! SessionWriter ──(set)──→ StoreShared ──(notify)──→ listeners
//!                              ↑                          │
//!                              └──── re-entrant writes ───┘
//!                                    (queued until the turn ends)
//! ```
//!
//! - Single logical thread, push-based. The container is `!Send` (`Rc` +
//!   `RefCell`), which pins it to the UI/event thread by construction.
//! - Each listener sees every transition at most once and in commit
//!   order.
//! - Writes made from inside a listener are queued and delivered after
//!   the in-flight transition has reached every listener.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use wicket_core::SessionState;

use crate::subscription::Subscription;
use crate::writer::SessionWriter;

type Listener = Box<dyn FnMut(&SessionState)>;

/// Identifier of a registered listener.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct ListenerId(u64);

struct ListenerSlot {
    id: ListenerId,
    // Shared so delivery can run callbacks without holding the registry
    // borrow: listeners may subscribe or cancel from inside a callback.
    callback: Rc<RefCell<Listener>>,
}

pub(crate) struct StoreShared {
    state: RefCell<SessionState>,
    changes: Cell<u64>,
    listeners: RefCell<Vec<ListenerSlot>>,
    next_listener_id: Cell<u64>,
    delivering: Cell<bool>,
    queued: RefCell<VecDeque<SessionState>>,
}

impl StoreShared {
    fn new() -> Self {
        Self {
            state: RefCell::new(SessionState::Restoring),
            changes: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener_id: Cell::new(0),
            delivering: Cell::new(false),
            queued: RefCell::new(VecDeque::new()),
        }
    }

    pub(crate) fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub(crate) fn changes(&self) -> u64 {
        self.changes.get()
    }

    fn add_listener(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_listener_id.get());
        self.next_listener_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(ListenerSlot {
            id,
            callback: Rc::new(RefCell::new(listener)),
        });
        id
    }

    pub(crate) fn remove_listener(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|slot| slot.id != id);
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|slot| slot.id == id)
    }

    /// Newest state from the writer's perspective: the tail of the
    /// re-entrant queue if any, else the committed state.
    fn latest(&self) -> SessionState {
        self.queued
            .borrow()
            .back()
            .cloned()
            .unwrap_or_else(|| self.current())
    }

    /// Record a transition and notify listeners.
    ///
    /// Writing the latest state again is not a transition and delivers
    /// nothing.
    pub(crate) fn set(&self, next: SessionState) {
        if next == self.latest() {
            tracing::trace!(state = ?next, "session state unchanged; nothing to deliver");
            return;
        }

        if self.delivering.get() {
            tracing::trace!(state = ?next, "re-entrant session write queued");
            self.queued.borrow_mut().push_back(next);
            return;
        }

        self.delivering.set(true);
        let mut pending = Some(next);
        while let Some(state) = pending.take() {
            self.commit_and_deliver(state);
            pending = self.queued.borrow_mut().pop_front();
        }
        self.delivering.set(false);
    }

    fn commit_and_deliver(&self, state: SessionState) {
        *self.state.borrow_mut() = state.clone();
        let seq = self.changes.get() + 1;
        self.changes.set(seq);
        tracing::debug!(seq, state = ?state, "session state changed");

        // Snapshot the registry so callbacks may freely subscribe or
        // cancel while delivery is in progress.
        let snapshot: Vec<(ListenerId, Rc<RefCell<Listener>>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|slot| (slot.id, Rc::clone(&slot.callback)))
            .collect();

        for (id, callback) in snapshot {
            // Skip listeners cancelled earlier in this same delivery.
            if !self.is_registered(id) {
                continue;
            }
            (callback.borrow_mut())(&state);
        }
    }
}

/// Read/subscribe handle to a session store.
///
/// Cloning hands the same underlying store to another reader. The unique
/// mutation capability is the [`SessionWriter`] returned alongside the
/// store by [`session_store`]; readers can never mutate.
#[derive(Clone)]
pub struct SessionStore {
    shared: Rc<StoreShared>,
}

/// Create a session store and its unique writer.
///
/// Shaped like [`std::sync::mpsc::channel`]: the writer half goes to the
/// authentication collaborator, the store half is cloned into every
/// reader. The initial state is [`SessionState::Restoring`]: a fresh
/// client has not yet settled whether a previous session can be resumed.
pub fn session_store() -> (SessionWriter, SessionStore) {
    let shared = Rc::new(StoreShared::new());
    (
        SessionWriter::new(Rc::clone(&shared)),
        SessionStore { shared },
    )
}

impl SessionStore {
    /// Latest known state. Synchronous; never blocks.
    pub fn current(&self) -> SessionState {
        self.shared.current()
    }

    /// Number of committed transitions since construction.
    pub fn changes(&self) -> u64 {
        self.shared.changes()
    }

    /// Register a listener invoked on every subsequent state change,
    /// including identity changes that do not change presence.
    ///
    /// The listener is not invoked for the state current at registration;
    /// seed from [`current`](Self::current) first. The returned guard
    /// deregisters the listener when cancelled or dropped.
    pub fn subscribe(&self, listener: impl FnMut(&SessionState) + 'static) -> Subscription {
        let id = self.shared.add_listener(Box::new(listener));
        Subscription::new(Rc::downgrade(&self.shared), id)
    }
}

impl core::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.current())
            .field("changes", &self.changes())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wicket_core::Identity;

    fn recorded(store: &SessionStore) -> (Rc<RefCell<Vec<SessionState>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
        (seen, sub)
    }

    #[test]
    fn starts_restoring_with_no_changes() {
        let (_writer, store) = session_store();
        assert_eq!(store.current(), SessionState::Restoring);
        assert_eq!(store.changes(), 0);
    }

    #[test]
    fn delivers_every_transition_in_commit_order() {
        let (writer, store) = session_store();
        let (seen, _sub) = recorded(&store);

        let alice = Identity::new();
        writer.resolve_restore(None);
        writer.sign_in(alice);
        writer.begin_restore();

        assert_eq!(
            *seen.borrow(),
            vec![
                SessionState::SignedOut,
                SessionState::SignedIn(alice),
                SessionState::Restoring,
            ]
        );
        assert_eq!(store.changes(), 3);
    }

    #[test]
    fn writing_the_current_state_again_delivers_nothing() {
        let (writer, store) = session_store();
        let (seen, _sub) = recorded(&store);

        writer.sign_out();
        writer.sign_out();
        writer.resolve_restore(None);

        assert_eq!(*seen.borrow(), vec![SessionState::SignedOut]);
        assert_eq!(store.changes(), 1);
    }

    #[test]
    fn identity_change_without_presence_change_is_still_delivered() {
        let (writer, store) = session_store();
        let (seen, _sub) = recorded(&store);

        let alice = Identity::new();
        let bob = Identity::new();
        writer.sign_in(alice);
        writer.sign_in(bob);

        assert_eq!(
            *seen.borrow(),
            vec![SessionState::SignedIn(alice), SessionState::SignedIn(bob)]
        );
    }

    #[test]
    fn cancel_stops_delivery_and_is_idempotent() {
        let (writer, store) = session_store();
        let (seen, mut sub) = recorded(&store);

        writer.sign_out();
        sub.cancel();
        sub.cancel();
        writer.sign_in(Identity::new());

        assert_eq!(*seen.borrow(), vec![SessionState::SignedOut]);
        assert!(sub.is_cancelled());
    }

    #[test]
    fn dropping_the_guard_releases_the_subscription() {
        let (writer, store) = session_store();
        let (seen, sub) = recorded(&store);

        drop(sub);
        writer.sign_out();

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn reentrant_writes_are_delivered_after_the_inflight_transition() {
        let (writer, store) = session_store();
        let writer = Rc::new(writer);

        let alice = Identity::new();
        let reentrant = Rc::clone(&writer);
        let _first = store.subscribe(move |state| {
            if matches!(state, SessionState::SignedOut) {
                reentrant.sign_in(alice);
            }
        });
        let (seen, _second) = recorded(&store);

        writer.sign_out();

        // The second listener sees both transitions, in order, even
        // though the sign-in was issued mid-delivery.
        assert_eq!(
            *seen.borrow(),
            vec![SessionState::SignedOut, SessionState::SignedIn(alice)]
        );
        assert_eq!(store.current(), SessionState::SignedIn(alice));
    }

    #[test]
    fn listener_cancelled_mid_delivery_misses_the_inflight_transition() {
        let (writer, store) = session_store();

        let doomed: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let canceller = Rc::clone(&doomed);
        let _first = store.subscribe(move |_| {
            if let Some(sub) = canceller.borrow_mut().as_mut() {
                sub.cancel();
            }
        });

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        *doomed.borrow_mut() =
            Some(store.subscribe(move |state: &SessionState| sink.borrow_mut().push(state.clone())));

        writer.sign_out();

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn guard_outliving_the_store_is_inert() {
        let (writer, store) = session_store();
        let (_seen, mut sub) = recorded(&store);

        drop(store);
        drop(writer);

        sub.cancel();
        assert!(sub.is_cancelled());
    }
}
