//! Navigation seam: the one side effect a gate may trigger.

use std::rc::Rc;

/// Navigation collaborator invoked when a gate enters `Denied`.
///
/// Implementations route to the sign-in entry point. The gate guarantees
/// at most one invocation per denied episode, however many re-renders
/// happen in between.
pub trait RedirectSink {
    fn redirect_to_sign_in(&self);
}

impl<S> RedirectSink for Rc<S>
where
    S: RedirectSink + ?Sized,
{
    fn redirect_to_sign_in(&self) {
        (**self).redirect_to_sign_in();
    }
}

/// Adapt a plain closure into a sink.
pub struct RedirectFn<F>(pub F);

impl<F> RedirectSink for RedirectFn<F>
where
    F: Fn(),
{
    fn redirect_to_sign_in(&self) {
        (self.0)();
    }
}
