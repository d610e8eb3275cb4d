//! The access gate: a per-view observer of the session store.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use wicket_core::SessionState;
use wicket_session::{SessionStore, Subscription};

use crate::decision::{GateState, RenderDecision};
use crate::redirect::RedirectSink;

struct GateShared<S> {
    state: Cell<GateState>,
    denied_episodes: Cell<u64>,
    sink: S,
}

/// Gate wrapping one protected view.
///
/// Mounting acquires a store subscription; dropping the gate (or calling
/// [`unmount`](Self::unmount)) releases it on every exit path, so a gate
/// that no longer backs a view is never notified and can never issue a
/// stale redirect.
///
/// The redirect fires exactly once per *entry* into `Denied`, tracked
/// against the previously observed gate state, never re-derived from
/// identity presence on a render cycle.
pub struct AccessGate<S> {
    shared: Rc<GateShared<S>>,
    subscription: Subscription,
}

impl<S> AccessGate<S>
where
    S: RedirectSink + 'static,
{
    /// Mount a gate over the given store.
    ///
    /// The gate seeds from the current snapshot before observing changes:
    /// mounting into an already signed-out session is an entry into
    /// `Denied` and redirects exactly once.
    pub fn mount(store: &SessionStore, sink: S) -> Self {
        let shared = Rc::new(GateShared {
            state: Cell::new(GateState::Pending),
            denied_episodes: Cell::new(0),
            sink,
        });

        shared.observe(&store.current());

        let weak: Weak<GateShared<S>> = Rc::downgrade(&shared);
        let subscription = store.subscribe(move |session| {
            if let Some(shared) = weak.upgrade() {
                shared.observe(session);
            }
        });

        Self {
            shared,
            subscription,
        }
    }

    /// Current machine state.
    pub fn state(&self) -> GateState {
        self.shared.state.get()
    }

    /// What the wrapped view should render right now.
    ///
    /// Pure read; calling it any number of times triggers nothing.
    pub fn render(&self) -> RenderDecision {
        self.state().render()
    }

    /// Number of distinct `Denied` episodes so far, one redirect each.
    pub fn denied_episodes(&self) -> u64 {
        self.shared.denied_episodes.get()
    }

    /// Release the store subscription. Equivalent to dropping the gate.
    pub fn unmount(mut self) {
        self.subscription.cancel();
    }
}

impl<S> GateShared<S>
where
    S: RedirectSink,
{
    fn observe(&self, session: &SessionState) {
        let next = GateState::of(session);
        let prev = self.state.replace(next);
        if prev == next {
            return;
        }

        tracing::debug!(?prev, ?next, "gate transition");
        if next == GateState::Denied {
            let episode = self.denied_episodes.get() + 1;
            self.denied_episodes.set(episode);
            tracing::debug!(episode, "no identity; redirecting to sign-in");
            self.sink.redirect_to_sign_in();
        }
    }
}
