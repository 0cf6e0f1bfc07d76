//! Role enumeration.
//!
//! A [`Role`] is the single profile attribute the core interprets. It is a
//! closed set: route trees, shell chrome, and capability grants are all
//! total functions over exactly these three variants.

use serde::{Deserialize, Serialize};

/// Access role resolved from a principal's profile record.
///
/// Governs which route tree and which shell chrome a session may reach.
///
/// | Role | Route tree | Chrome |
/// |-----------|---------------------------------------|------------------|
/// | `Farmer` | advisory, market, schemes, learning… | farmer sidebar |
/// | `Officer` | advisory management, crop data… | officer sidebar |
/// | `Admin` | user/officer/farmer management… | admin sidebar |
///
/// # Wire Format
///
/// Profile records store the role as a lowercase string (`"farmer"`,
/// `"officer"`, `"admin"`). Any other string fails deserialization, which
/// the profile store treats as "no usable record" rather than an error.
///
/// # Example
///
/// ```
/// use bhoomi_types::Role;
///
/// assert_eq!(Role::parse("officer"), Some(Role::Officer));
/// assert_eq!(Role::parse("Farmer"), Some(Role::Farmer));
/// assert_eq!(Role::parse("root"), None);
/// assert_eq!(Role::Admin.as_str(), "admin");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Cultivator account: the broadest tree (advisory, market, schemes…).
    Farmer,
    /// Extension officer: advisory management and field oversight.
    Officer,
    /// Platform administrator: account and platform management.
    Admin,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 3] = [Role::Farmer, Role::Officer, Role::Admin];

    /// Returns the lowercase wire tag for this role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Officer => "officer",
            Role::Admin => "admin",
        }
    }

    /// Parses a role tag (case-insensitive).
    ///
    /// Returns `None` for anything outside the closed set — an unknown tag
    /// in a stored record means the record is unusable, not that parsing
    /// should be lenient.
    #[must_use]
    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Some(Role::Farmer),
            "officer" => Some(Role::Officer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
