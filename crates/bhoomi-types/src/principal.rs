//! Principal (authenticated actor) type.
//!
//! A [`Principal`] is what the identity stream hands over on sign-in:
//! the provider-issued id plus whatever display attributes the provider
//! knows. It carries identity only — the role that decides what the
//! principal may reach lives in the profile store, not here.

use crate::PrincipalId;
use serde::{Deserialize, Serialize};

/// The authenticated actor reported by the identity stream.
///
/// Read-only to the core: created by the stream adapter, carried through
/// the session state, and exposed to shell chrome (navbar greeting). The
/// core never edits a principal; a changed identity arrives as a fresh
/// sign-in event.
///
/// # Why Not Carry the Role Here?
///
/// The provider knows *who* signed in; the profile store knows *what*
/// they are. Conflating the two would let an identity event smuggle in an
/// unverified role. The session machine joins them explicitly instead.
///
/// # Example
///
/// ```
/// use bhoomi_types::{Principal, PrincipalId};
///
/// let p = Principal::new(PrincipalId::new("uid-2041"))
///     .with_display_name("Ravi")
///     .with_email("ravi@example.in");
///
/// assert_eq!(p.label(), "Ravi");
/// assert_eq!(p.email(), Some("ravi@example.in"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: PrincipalId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
}

impl Principal {
    /// Creates a principal with no display attributes.
    #[must_use]
    pub fn new(id: PrincipalId) -> Self {
        Self {
            id,
            display_name: None,
            email: None,
        }
    }

    /// Attaches a display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Attaches an email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the provider-issued identifier.
    #[must_use]
    pub fn id(&self) -> &PrincipalId {
        &self.id
    }

    /// Returns the display name, if the provider supplied one.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Returns the email address, if the provider supplied one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the best human-readable label: display name, else raw id.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
