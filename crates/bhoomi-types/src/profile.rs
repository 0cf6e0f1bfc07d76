//! Profile (externally stored role record).

use crate::Role;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The stored record a profile lookup returns for a principal.
///
/// The core interprets exactly one field: [`role`](Profile::role). Every
/// other field in the record is opaque payload, preserved and handed to
/// downstream pages untouched.
///
/// # Wire Format
///
/// The record serializes flat, the way document stores keep it:
///
/// ```json
/// { "role": "farmer", "village": "Wagholi", "acreage": 3 }
/// ```
///
/// A record whose `role` tag is outside the closed set fails to
/// deserialize; the store layer treats that the same as a missing record.
///
/// # Example
///
/// ```
/// use bhoomi_types::{Profile, Role};
///
/// let profile = Profile::new(Role::Farmer)
///     .with_attribute("village", serde_json::json!("Wagholi"));
///
/// assert_eq!(profile.role(), Role::Farmer);
/// assert_eq!(profile.attribute("village"), Some(&serde_json::json!("Wagholi")));
/// assert_eq!(profile.attribute("district"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    role: Role,
    #[serde(flatten)]
    attributes: serde_json::Map<String, Value>,
}

impl Profile {
    /// Creates a profile carrying only a role.
    #[must_use]
    pub fn new(role: Role) -> Self {
        Self {
            role,
            attributes: serde_json::Map::new(),
        }
    }

    /// Attaches an opaque payload attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Returns the resolved role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns one payload attribute by key.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Returns all payload attributes.
    #[must_use]
    pub fn attributes(&self) -> &serde_json::Map<String, Value> {
        &self.attributes
    }
}
