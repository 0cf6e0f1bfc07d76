//! Capability tags carried by route declarations.
//!
//! Every route in a role tree is tagged with the functional area it
//! exposes, and every role maps to a fixed grant — the union of areas
//! its tree may use. The baseline authorization model is coarse: a
//! resolved role sees its *entire* tree, so capabilities are not
//! checked per request. They exist to keep the trees honest (a route
//! declaring an area outside its role's grant is a catalog defect, see
//! [`RouteCatalog::validate`](crate::RouteCatalog::validate)) and to
//! label mounted pages for downstream consumers.
//!
//! # Example
//!
//! ```
//! use bhoomi_routes::Capability;
//! use bhoomi_types::Role;
//!
//! let grant = Capability::grant_for(Role::Officer);
//! assert!(grant.contains(Capability::MANAGE_CONTENT));
//! assert!(!grant.contains(Capability::MANAGE_USERS));
//!
//! // A route's tag must stay inside its role's grant.
//! assert!(grant.contains(Capability::MONITOR));
//! ```

use bhoomi_types::Role;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Functional areas a route can expose.
    ///
    /// | Capability | Covers |
    /// |------------|--------|
    /// | [`VIEW_DASHBOARD`](Self::VIEW_DASHBOARD) | role index pages, profile |
    /// | [`ADVISORY`](Self::ADVISORY) | crop/soil advisory, guides, voice assistant |
    /// | [`MARKET`](Self::MARKET) | mandi prices, rentals, waste exchange, commodities |
    /// | [`COMMUNITY`](Self::COMMUNITY) | community feed, FPO groups, farmer queries |
    /// | [`MONITOR`](Self::MONITOR) | NDVI, weather, alerts, crop data, reports |
    /// | [`LEARN`](Self::LEARN) | learning modules, scheme catalog |
    /// | [`MANAGE_CONTENT`](Self::MANAGE_CONTENT) | advisory/knowledge-base management |
    /// | [`MANAGE_USERS`](Self::MANAGE_USERS) | user/officer/farmer administration |
    /// | [`ADMINISTER`](Self::ADMINISTER) | platform settings |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Capability: u16 {
        /// Role landing pages and the principal's own profile.
        const VIEW_DASHBOARD = 0b0_0000_0001;
        /// Advisory content: crop guide, soil advisory, voice assistant.
        const ADVISORY       = 0b0_0000_0010;
        /// Marketplace surfaces: mandi, agro-rent, waste exchange, commodities.
        const MARKET         = 0b0_0000_0100;
        /// Community feed, FPO groups, farmer queries.
        const COMMUNITY      = 0b0_0000_1000;
        /// Field monitoring: NDVI, weather, alerts, crop data, reports.
        const MONITOR        = 0b0_0001_0000;
        /// Learning modules and government scheme catalog.
        const LEARN          = 0b0_0010_0000;
        /// Authoring and curation of advisory/knowledge content.
        const MANAGE_CONTENT = 0b0_0100_0000;
        /// User, officer, and farmer account administration.
        const MANAGE_USERS   = 0b0_1000_0000;
        /// Platform-wide settings.
        const ADMINISTER     = 0b1_0000_0000;
    }
}

impl Capability {
    /// Everything a farmer session's tree may use.
    pub const FARMER_GRANT: Self = Self::VIEW_DASHBOARD
        .union(Self::ADVISORY)
        .union(Self::MARKET)
        .union(Self::COMMUNITY)
        .union(Self::MONITOR)
        .union(Self::LEARN);

    /// Everything an officer session's tree may use.
    pub const OFFICER_GRANT: Self = Self::VIEW_DASHBOARD
        .union(Self::ADVISORY)
        .union(Self::COMMUNITY)
        .union(Self::MONITOR)
        .union(Self::LEARN)
        .union(Self::MANAGE_CONTENT);

    /// Everything an admin session's tree may use.
    pub const ADMIN_GRANT: Self = Self::VIEW_DASHBOARD
        .union(Self::MANAGE_USERS)
        .union(Self::ADMINISTER);

    /// Returns the fixed grant for a role.
    ///
    /// Grants are per-role, not per-principal: the baseline model has
    /// no sub-permissions within a role.
    #[must_use]
    pub fn grant_for(role: Role) -> Self {
        match role {
            Role::Farmer => Self::FARMER_GRANT,
            Role::Officer => Self::OFFICER_GRANT,
            Role::Admin => Self::ADMIN_GRANT,
        }
    }

    /// Returns a human-readable list of capability names.
    ///
    /// # Example
    ///
    /// ```
    /// use bhoomi_routes::Capability;
    ///
    /// let caps = Capability::MONITOR | Capability::LEARN;
    /// assert_eq!(caps.names(), vec!["MONITOR", "LEARN"]);
    /// ```
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.contains(Self::VIEW_DASHBOARD) {
            names.push("VIEW_DASHBOARD");
        }
        if self.contains(Self::ADVISORY) {
            names.push("ADVISORY");
        }
        if self.contains(Self::MARKET) {
            names.push("MARKET");
        }
        if self.contains(Self::COMMUNITY) {
            names.push("COMMUNITY");
        }
        if self.contains(Self::MONITOR) {
            names.push("MONITOR");
        }
        if self.contains(Self::LEARN) {
            names.push("LEARN");
        }
        if self.contains(Self::MANAGE_CONTENT) {
            names.push("MANAGE_CONTENT");
        }
        if self.contains(Self::MANAGE_USERS) {
            names.push("MANAGE_USERS");
        }
        if self.contains(Self::ADMINISTER) {
            names.push("ADMINISTER");
        }
        names
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = self.names();
        if names.is_empty() {
            write!(f, "(none)")
        } else {
            write!(f, "{}", names.join(" | "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_are_role_shaped() {
        assert!(Capability::FARMER_GRANT.contains(Capability::MARKET));
        assert!(!Capability::FARMER_GRANT.contains(Capability::MANAGE_CONTENT));

        assert!(Capability::OFFICER_GRANT.contains(Capability::MANAGE_CONTENT));
        assert!(!Capability::OFFICER_GRANT.contains(Capability::MARKET));
        assert!(!Capability::OFFICER_GRANT.contains(Capability::MANAGE_USERS));

        assert!(Capability::ADMIN_GRANT.contains(Capability::MANAGE_USERS));
        assert!(Capability::ADMIN_GRANT.contains(Capability::ADMINISTER));
        assert!(!Capability::ADMIN_GRANT.contains(Capability::ADVISORY));
    }

    #[test]
    fn every_role_grant_includes_its_index() {
        for role in Role::ALL {
            assert!(
                Capability::grant_for(role).contains(Capability::VIEW_DASHBOARD),
                "{role} cannot reach its own index"
            );
        }
    }

    #[test]
    fn names_follow_declaration_order() {
        let caps = Capability::ADMINISTER | Capability::VIEW_DASHBOARD;
        assert_eq!(caps.names(), vec!["VIEW_DASHBOARD", "ADMINISTER"]);
    }

    #[test]
    fn display_formatting() {
        assert_eq!(Capability::MONITOR.to_string(), "MONITOR");
        assert_eq!(
            (Capability::MONITOR | Capability::LEARN).to_string(),
            "MONITOR | LEARN"
        );
        assert_eq!(Capability::empty().to_string(), "(none)");
    }

    #[test]
    fn serde_roundtrip() {
        let caps = Capability::ADVISORY | Capability::LEARN;
        let json = serde_json::to_string(&caps).expect("serialize");
        let parsed: Capability = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, caps);
    }
}
