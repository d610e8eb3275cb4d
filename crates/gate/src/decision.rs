//! Gate states and their render mapping.

use serde::{Deserialize, Serialize};

use wicket_core::SessionState;

/// Access decision for one protected view.
///
/// ```text
///   Pending ──(settled, absent)───→ Denied
///      │                            ↑    │
///      │(settled, present)  (expiry)│    │(sign-in)
///      ↓                            │    ↓
///   Granted ────────────────────────┘
/// ```
///
/// `Pending` only occurs while the session is restoring; it never
/// recurs unless the authentication collaborator explicitly starts a new
/// restoration attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    /// Session restoration has not settled; show a placeholder.
    Pending,

    /// No identity. The view stays hidden while navigation redirects to
    /// sign-in.
    Denied,

    /// An identity is present; the protected content may render.
    Granted,
}

impl GateState {
    /// Classify a session state. Total and pure.
    pub fn of(session: &SessionState) -> Self {
        match session {
            SessionState::Restoring => Self::Pending,
            SessionState::SignedOut => Self::Denied,
            SessionState::SignedIn(_) => Self::Granted,
        }
    }

    /// What the wrapping view should render in this state.
    pub fn render(self) -> RenderDecision {
        match self {
            Self::Pending => RenderDecision::Loading,
            Self::Denied => RenderDecision::Hidden,
            Self::Granted => RenderDecision::Content,
        }
    }
}

/// Instruction to the presentation layer wrapping a protected view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderDecision {
    /// Show the loading placeholder.
    Loading,

    /// Render nothing. Protected content must not flash while a redirect
    /// is in flight.
    Hidden,

    /// Render the protected content.
    Content,
}
