//! Role chrome: sidebar navigation, accent, bottom tabs.
//!
//! Pure dispatch over the closed role set. Each role gets its own nav
//! inventory and accent; the mobile bottom bar is the first few nav
//! items of *that* role, not a shared bar.

use bhoomi_routes::RoutePath;
use bhoomi_types::Role;
use serde::Serialize;

/// Items shown in the mobile bottom tab bar.
pub const BOTTOM_TAB_COUNT: usize = 4;

/// Per-role accent color, applied to the sidebar background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    /// Farmer surfaces.
    Blue,
    /// Officer surfaces.
    Green,
    /// Admin surfaces.
    Indigo,
}

impl Accent {
    #[must_use]
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Farmer => Accent::Blue,
            Role::Officer => Accent::Green,
            Role::Admin => Accent::Indigo,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Green => "green",
            Accent::Indigo => "indigo",
        }
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One sidebar destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub path: RoutePath,
}

impl NavItem {
    fn new(label: &'static str, path: RoutePath) -> Self {
        Self { label, path }
    }
}

/// The chrome wrapped around a mounted role subtree.
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    role: Role,
    accent: Accent,
    nav: Vec<NavItem>,
}

impl Chrome {
    /// Builds the chrome for `role`, with nav paths rooted under
    /// `prefix`.
    #[must_use]
    pub fn for_role(role: Role, prefix: &RoutePath) -> Self {
        let entries: &[(&'static str, &'static str)] = match role {
            Role::Farmer => &[
                ("Dashboard", ""),
                ("Advisory", "advisory"),
                ("Soil Advisory", "soil-advisory"),
                ("Community", "community"),
                ("Crop Guide", "crop-guide"),
                ("Voice Assistant", "voice-assistant"),
                ("Waste Exchange", "waste-exchange"),
                ("Inventory", "inventory"),
                ("FPO Nearby", "fpo"),
                ("NDVI", "ndvi"),
                ("Weather", "weather"),
                ("Agro Rent", "agro-rent"),
                ("Mandi Prices", "mandi"),
                ("Alerts", "alerts"),
                ("Learning", "learning"),
                ("Commodity Prices", "commodity-selection"),
                ("Schemes", "schemes"),
                ("Profile", "profile"),
            ],
            Role::Officer => &[
                ("Officer Dashboard", ""),
                ("Advisory Management", "advisory-management"),
                ("Alerts", "alerts"),
                ("Crop Data", "crop-data"),
                ("Farmer Queries", "farmer-queries"),
                ("Knowledge Base", "knowledge-base"),
                ("Report & Analytics", "reports-analytics"),
                ("Profile", "profile"),
            ],
            Role::Admin => &[
                ("Admin Dashboard", ""),
                ("User Management", "user-management"),
                ("Officer Management", "officer-management"),
                ("Farmer Management", "farmer-management"),
                ("System Settings", "settings"),
                ("Profile", "profile"),
            ],
        };

        let nav = entries
            .iter()
            .map(|(label, segment)| {
                let path = if segment.is_empty() {
                    prefix.clone()
                } else {
                    prefix.join(segment)
                };
                NavItem::new(label, path)
            })
            .collect();

        Self {
            role,
            accent: Accent::for_role(role),
            nav,
        }
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn accent(&self) -> Accent {
        self.accent
    }

    /// Sidebar items, index first, then tree order.
    #[must_use]
    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav
    }

    /// The mobile bottom bar: the role's first few destinations.
    #[must_use]
    pub fn bottom_tabs(&self) -> &[NavItem] {
        &self.nav[..self.nav.len().min(BOTTOM_TAB_COUNT)]
    }

    /// Finds the nav item for an exact path, for active-item marking.
    #[must_use]
    pub fn item_for(&self, path: &RoutePath) -> Option<&NavItem> {
        self.nav.iter().find(|item| item.path == *path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_routes::RouteCatalog;

    fn prefix() -> RoutePath {
        RoutePath::parse("/dashboard")
    }

    #[test]
    fn accents_are_role_fixed() {
        assert_eq!(Accent::for_role(Role::Farmer), Accent::Blue);
        assert_eq!(Accent::for_role(Role::Officer), Accent::Green);
        assert_eq!(Accent::for_role(Role::Admin), Accent::Indigo);
    }

    #[test]
    fn every_nav_path_is_declared_for_its_role() {
        let catalog = RouteCatalog::standard();
        for role in Role::ALL {
            let chrome = Chrome::for_role(role, catalog.protected_prefix());
            let tree = catalog.tree_for(role);
            for item in chrome.nav_items() {
                let rest = item
                    .path
                    .strip_prefix(catalog.protected_prefix())
                    .unwrap_or_else(|| panic!("{role}: {} not under prefix", item.path));
                assert!(
                    tree.resolve(&rest).is_some(),
                    "{role}: nav item '{}' ({}) is not routable",
                    item.label,
                    item.path
                );
            }
        }
    }

    #[test]
    fn chrome_is_disjoint_across_roles() {
        let officer = Chrome::for_role(Role::Officer, &prefix());
        let admin = Chrome::for_role(Role::Admin, &prefix());
        assert!(officer
            .nav_items()
            .iter()
            .all(|i| i.path.as_str() != "/dashboard/user-management"));
        assert!(admin
            .nav_items()
            .iter()
            .all(|i| i.path.as_str() != "/dashboard/crop-data"));
    }

    #[test]
    fn bottom_tabs_are_the_first_destinations() {
        let chrome = Chrome::for_role(Role::Officer, &prefix());
        let tabs: Vec<&str> = chrome.bottom_tabs().iter().map(|i| i.label).collect();
        assert_eq!(
            tabs,
            vec!["Officer Dashboard", "Advisory Management", "Alerts", "Crop Data"]
        );
        assert_eq!(chrome.bottom_tabs().len(), BOTTOM_TAB_COUNT);
    }

    #[test]
    fn index_item_points_at_the_prefix() {
        let chrome = Chrome::for_role(Role::Admin, &prefix());
        assert_eq!(chrome.nav_items()[0].path.as_str(), "/dashboard");
        assert_eq!(
            chrome.item_for(&RoutePath::parse("/dashboard")).unwrap().label,
            "Admin Dashboard"
        );
        assert!(chrome.item_for(&RoutePath::parse("/nowhere")).is_none());
    }
}
