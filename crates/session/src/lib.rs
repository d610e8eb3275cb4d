//! `wicket-session` — single-writer observable session state.
//!
//! One [`SessionStore`] per running client, created together with its
//! unique [`SessionWriter`]. The writer belongs to the authentication
//! collaborator (sign-in flow, session restoration); every other
//! component only reads and subscribes. That single-writer discipline,
//! plus synchronous same-turn delivery, is what makes the store safe
//! without any locking protocol.

pub mod store;
pub mod subscription;
pub mod writer;

pub use store::{SessionStore, session_store};
pub use subscription::Subscription;
pub use writer::SessionWriter;
