//! `wicket-gate` — per-view access gating over a session store.
//!
//! An [`AccessGate`] wraps one protected view. It observes the session
//! store and tells the presentation layer what to show: a loading
//! placeholder, the protected content, or nothing while a redirect to
//! sign-in is in flight. The one side effect it may trigger is a single
//! redirect per denied episode, through the [`RedirectSink`] seam.

pub mod decision;
pub mod gate;
pub mod redirect;

pub use decision::{GateState, RenderDecision};
pub use gate::AccessGate;
pub use redirect::{RedirectFn, RedirectSink};
