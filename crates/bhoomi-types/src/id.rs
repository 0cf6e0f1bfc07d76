//! Identifier types.
//!
//! Two identifiers with deliberately different origins:
//!
//! - [`PrincipalId`] — issued by the external authentication provider.
//!   Opaque, never minted by this codebase.
//! - [`SessionId`] — minted here, one per mounted session machine, used
//!   only to correlate log lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for an authenticated principal.
///
/// The authentication provider owns the format; the core treats the value
/// as an inert key for profile lookups and equality checks. Nothing in
/// this codebase ever constructs one except by copying what the provider
/// supplied.
///
/// # Why No Default?
///
/// A defaulted principal id would be an identity nobody issued. Requiring
/// an explicit value keeps "who is this" answerable at every call site.
///
/// # Example
///
/// ```
/// use bhoomi_types::PrincipalId;
///
/// let id = PrincipalId::new("uid-2041");
/// assert_eq!(id.as_str(), "uid-2041");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Wraps a provider-issued identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "principal:{}", self.0)
    }
}

/// Identifier for one mounted session machine instance.
///
/// Minted at spawn (v4 UUID) and attached to the machine's log output so
/// concurrent machines in tests remain distinguishable. Carries no
/// authorization meaning.
///
/// # Example
///
/// ```
/// use bhoomi_types::SessionId;
///
/// let id = SessionId::new();
/// assert!(format!("{id}").starts_with("session:"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mints a fresh random session identifier.
    #[must_use]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

// NOTE: SessionId intentionally does not implement Default.
// `SessionId::new()` generates a *random* identifier; a Default impl would
// suggest a meaningful "zero" session exists. Explicit minting only.

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn principal_id_preserves_provider_value() {
        let id = PrincipalId::new("AbC-123_xyz");
        assert_eq!(id.as_str(), "AbC-123_xyz");
    }

    #[test]
    fn principal_id_equality_is_value_equality() {
        assert_eq!(PrincipalId::new("a"), PrincipalId::new("a"));
        assert_ne!(PrincipalId::new("a"), PrincipalId::new("b"));
    }

    #[test]
    fn principal_id_serde_is_transparent() {
        let id = PrincipalId::new("uid-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"uid-7\"");
        let back: PrincipalId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn session_id_display() {
        let id = SessionId::new();
        let display = format!("{id}");
        assert!(display.starts_with("session:"));
        assert!(display.contains(&id.uuid().to_string()));
    }

    #[test]
    fn session_id_random() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
