//! `wicket-core` — session-domain foundation types.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): who is currently signed in, and the boundary errors for
//! adopting identities from the outside world.

pub mod error;
pub mod identity;
pub mod state;

pub use error::IdentityError;
pub use identity::Identity;
pub use state::SessionState;
