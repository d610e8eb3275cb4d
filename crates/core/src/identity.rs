use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;

/// Opaque reference to an authenticated user.
///
/// Presence is the only thing the access-control core inspects; the inner
/// value is carried for collaborators (views, audit logs) that need it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(Uuid);

impl Identity {
    /// Create a new identity.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing identities explicitly in
    /// tests for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for Identity {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<Identity> for Uuid {
    fn from(value: Identity) -> Self {
        value.0
    }
}

impl FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| IdentityError::invalid(e.to_string()))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_its_own_display_form() {
        let identity = Identity::new();
        let parsed: Identity = identity.to_string().parse().unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn rejects_garbage_input() {
        let err = "not-an-identity".parse::<Identity>().unwrap_err();
        assert!(matches!(err, IdentityError::Invalid(_)));
    }
}
