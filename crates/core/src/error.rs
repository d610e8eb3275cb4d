//! Boundary error model.

use thiserror::Error;

/// Errors produced when adopting identity values from outside.
///
/// Keep this focused on the parsing boundary. The session core itself is
/// infallible: it performs no IO, and every authentication failure
/// reaches it as a plain state transition, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The input was not a valid identity reference.
    #[error("invalid identity: {0}")]
    Invalid(String),
}

impl IdentityError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
