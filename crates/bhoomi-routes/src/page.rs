//! References to external page components.
//!
//! The core never renders pages; it resolves which page an external
//! surface should mount. A [`PageRef`] is that resolution result: a
//! stable `area::name` label the downstream renderer keys off.

use serde::Serialize;

/// Which surface a page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageArea {
    /// Reachable without a session (landing, sign-in, registration).
    Public,
    Farmer,
    Officer,
    Admin,
}

impl PageArea {
    /// Lowercase label used in page identifiers.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PageArea::Public => "public",
            PageArea::Farmer => "farmer",
            PageArea::Officer => "officer",
            PageArea::Admin => "admin",
        }
    }
}

/// Identifies one external page component.
///
/// Page names are static configuration, not runtime data, so the whole
/// reference is `Copy` and comparisons are cheap.
///
/// # Example
///
/// ```
/// use bhoomi_routes::PageRef;
///
/// let page = PageRef::farmer("mandi");
/// assert_eq!(page.to_string(), "farmer::mandi");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRef {
    area: PageArea,
    name: &'static str,
}

impl PageRef {
    /// A page on the public surface.
    #[must_use]
    pub const fn public(name: &'static str) -> Self {
        Self { area: PageArea::Public, name }
    }

    /// A page in the farmer tree.
    #[must_use]
    pub const fn farmer(name: &'static str) -> Self {
        Self { area: PageArea::Farmer, name }
    }

    /// A page in the officer tree.
    #[must_use]
    pub const fn officer(name: &'static str) -> Self {
        Self { area: PageArea::Officer, name }
    }

    /// A page in the admin tree.
    #[must_use]
    pub const fn admin(name: &'static str) -> Self {
        Self { area: PageArea::Admin, name }
    }

    #[must_use]
    pub fn area(&self) -> PageArea {
        self.area
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl std::fmt::Display for PageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.area.as_str(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_area_scoped() {
        assert_eq!(PageRef::public("landing").to_string(), "public::landing");
        assert_eq!(PageRef::officer("crop-data").to_string(), "officer::crop-data");
        assert_eq!(PageRef::admin("settings").to_string(), "admin::settings");
    }

    #[test]
    fn same_name_different_area_differs() {
        assert_ne!(PageRef::farmer("profile"), PageRef::officer("profile"));
        assert_eq!(PageRef::farmer("profile"), PageRef::farmer("profile"));
    }
}
