//! The route catalog: public surface plus the three role trees.
//!
//! Built once at startup and consulted read-only afterward. The trees
//! mirror the dashboard's page inventory; segment names are kebab-case
//! throughout. [`validate`](RouteCatalog::validate) catches authoring
//! mistakes — duplicate siblings, a route tagged outside its role's
//! grant, a public path shadowed by the protected prefix — so a broken
//! catalog fails at startup instead of misrouting at request time.

use crate::{Capability, PageRef, Route, RoutePath, RouteTree, Segment};
use bhoomi_types::{ErrorCode, Role};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog authoring defects.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two sibling routes share a literal segment; the second is
    /// unreachable.
    #[error("duplicate route segment '{path}' in {role} tree")]
    DuplicateSegment { role: Role, path: String },

    /// More than one parameter child at the same level; only the first
    /// can ever match.
    #[error("ambiguous parameter routes under '{path}' in {role} tree")]
    AmbiguousParams { role: Role, path: String },

    /// A route claims a capability its role's grant does not contain.
    #[error("route '{path}' in {role} tree is tagged {capability}, outside the role grant")]
    CapabilityExceedsGrant {
        role: Role,
        path: String,
        capability: Capability,
    },

    /// A public path sits under the protected prefix and would shadow
    /// protected routing.
    #[error("public path '{path}' lies under the protected prefix '{prefix}'")]
    SurfaceOverlapsProtected { path: RoutePath, prefix: RoutePath },
}

impl ErrorCode for CatalogError {
    fn code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateSegment { .. } => "ROUTES_DUPLICATE_SEGMENT",
            CatalogError::AmbiguousParams { .. } => "ROUTES_AMBIGUOUS_PARAMS",
            CatalogError::CapabilityExceedsGrant { .. } => "ROUTES_CAPABILITY_EXCEEDS_GRANT",
            CatalogError::SurfaceOverlapsProtected { .. } => "ROUTES_SURFACE_OVERLAP",
        }
    }

    fn is_recoverable(&self) -> bool {
        // Authoring defects: nothing to retry.
        false
    }
}

/// Paths of the shared public surface and the protected prefix.
///
/// These are deployment configuration; everything else in the catalog
/// is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicSurface {
    pub landing: RoutePath,
    pub sign_in: RoutePath,
    pub register: RoutePath,
    pub protected_prefix: RoutePath,
}

impl Default for PublicSurface {
    fn default() -> Self {
        Self {
            landing: RoutePath::root(),
            sign_in: RoutePath::parse("/auth"),
            register: RoutePath::parse("/register"),
            protected_prefix: RoutePath::parse("/dashboard"),
        }
    }
}

/// All route configuration for the dashboard.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    surface: PublicSurface,
    farmer: RouteTree,
    officer: RouteTree,
    admin: RouteTree,
}

impl RouteCatalog {
    /// The standard catalog on the default surface paths.
    #[must_use]
    pub fn standard() -> Self {
        Self::with_surface(PublicSurface::default())
    }

    /// The standard trees behind custom surface paths.
    #[must_use]
    pub fn with_surface(surface: PublicSurface) -> Self {
        Self {
            surface,
            farmer: farmer_tree(),
            officer: officer_tree(),
            admin: admin_tree(),
        }
    }

    #[must_use]
    pub fn surface(&self) -> &PublicSurface {
        &self.surface
    }

    #[must_use]
    pub fn protected_prefix(&self) -> &RoutePath {
        &self.surface.protected_prefix
    }

    /// The tree a resolved role may mount. Exactly one per role, never
    /// merged.
    #[must_use]
    pub fn tree_for(&self, role: Role) -> &RouteTree {
        match role {
            Role::Farmer => &self.farmer,
            Role::Officer => &self.officer,
            Role::Admin => &self.admin,
        }
    }

    /// Matches `path` against the public surface (exact match only).
    #[must_use]
    pub fn public_page(&self, path: &RoutePath) -> Option<PageRef> {
        if *path == self.surface.landing {
            Some(PageRef::public("landing"))
        } else if *path == self.surface.sign_in {
            Some(PageRef::public("sign-in"))
        } else if *path == self.surface.register {
            Some(PageRef::public("register"))
        } else {
            None
        }
    }

    /// Whether `path` lies under the protected prefix.
    #[must_use]
    pub fn is_protected(&self, path: &RoutePath) -> bool {
        path.starts_with(&self.surface.protected_prefix)
    }

    /// Every declared path for `role`, absolute, with parameter
    /// segments in `:name` form.
    #[must_use]
    pub fn declared_paths(&self, role: Role) -> Vec<(RoutePath, PageRef, Capability)> {
        self.tree_for(role)
            .entries()
            .into_iter()
            .map(|entry| {
                let mut path = self.surface.protected_prefix.clone();
                for segment in entry.path.split('/').filter(|s| !s.is_empty()) {
                    path = path.join(segment);
                }
                (path, entry.page, entry.capability)
            })
            .collect()
    }

    /// Checks the whole catalog for authoring defects.
    pub fn validate(&self) -> Result<(), CatalogError> {
        for public in [
            &self.surface.landing,
            &self.surface.sign_in,
            &self.surface.register,
        ] {
            if public.starts_with(&self.surface.protected_prefix) {
                return Err(CatalogError::SurfaceOverlapsProtected {
                    path: public.clone(),
                    prefix: self.surface.protected_prefix.clone(),
                });
            }
        }
        for role in Role::ALL {
            validate_tree(self.tree_for(role))?;
        }
        Ok(())
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Checks one tree: unique literal siblings, at most one parameter
/// child per level, every tag inside the role's grant.
pub fn validate_tree(tree: &RouteTree) -> Result<(), CatalogError> {
    let role = tree.role();
    let grant = Capability::grant_for(role);

    let index = tree.index();
    if !grant.contains(index.capability) {
        return Err(CatalogError::CapabilityExceedsGrant {
            role,
            path: String::new(),
            capability: index.capability,
        });
    }
    validate_level(role, grant, "", tree.children())
}

fn validate_level(
    role: Role,
    grant: Capability,
    parent: &str,
    routes: &[Route],
) -> Result<(), CatalogError> {
    let mut literals: Vec<&str> = Vec::new();
    let mut params = 0usize;

    for route in routes {
        let path = if parent.is_empty() {
            route.segment().to_string()
        } else {
            format!("{parent}/{}", route.segment())
        };

        match route.segment() {
            Segment::Literal(text) => {
                if literals.contains(&text) {
                    return Err(CatalogError::DuplicateSegment { role, path });
                }
                literals.push(text);
            }
            Segment::Param(_) => {
                params += 1;
                if params > 1 {
                    return Err(CatalogError::AmbiguousParams {
                        role,
                        path: parent.to_string(),
                    });
                }
            }
        }

        if route.mounted_page().is_some() && !grant.contains(route.capability()) {
            return Err(CatalogError::CapabilityExceedsGrant {
                role,
                path,
                capability: route.capability(),
            });
        }

        validate_level(role, grant, &path, route.children())?;
    }
    Ok(())
}

fn farmer_tree() -> RouteTree {
    use Capability as C;
    RouteTree::new(Role::Farmer, PageRef::farmer("dashboard"), C::VIEW_DASHBOARD).with_children(
        vec![
            Route::page("advisory", PageRef::farmer("advisory"), C::ADVISORY),
            Route::page("soil-advisory", PageRef::farmer("soil-advisory"), C::ADVISORY),
            Route::page("community", PageRef::farmer("community"), C::COMMUNITY),
            Route::page("crop-guide", PageRef::farmer("crop-guide"), C::ADVISORY),
            Route::page("voice-assistant", PageRef::farmer("voice-assistant"), C::ADVISORY),
            Route::page("waste-exchange", PageRef::farmer("waste-exchange"), C::MARKET),
            Route::page("inventory", PageRef::farmer("inventory"), C::MARKET),
            Route::page("fpo", PageRef::farmer("fpo"), C::COMMUNITY),
            Route::page("profile", PageRef::farmer("profile"), C::VIEW_DASHBOARD),
            Route::page("ndvi", PageRef::farmer("ndvi"), C::MONITOR),
            Route::page("weather", PageRef::farmer("weather"), C::MONITOR),
            Route::page("agro-rent", PageRef::farmer("agro-rent"), C::MARKET),
            Route::page("mandi", PageRef::farmer("mandi"), C::MARKET),
            Route::page("alerts", PageRef::farmer("alerts"), C::MONITOR),
            Route::page("learning", PageRef::farmer("learning"), C::LEARN)
                .with_child(Route::param("id", PageRef::farmer("learning-module"), C::LEARN)),
            Route::page(
                "commodity-selection",
                PageRef::farmer("commodity-selection"),
                C::MARKET,
            ),
            Route::branch("commodity").with_child(Route::param(
                "name",
                PageRef::farmer("commodity-prices"),
                C::MARKET,
            )),
            Route::page("schemes", PageRef::farmer("schemes"), C::LEARN).with_children(vec![
                Route::page("agriculture", PageRef::farmer("schemes-agriculture"), C::LEARN),
                Route::page("irrigation", PageRef::farmer("schemes-irrigation"), C::LEARN),
                Route::page("horticulture", PageRef::farmer("schemes-horticulture"), C::LEARN),
                Route::page("machines", PageRef::farmer("schemes-machines"), C::LEARN),
                Route::page("animal", PageRef::farmer("schemes-animal"), C::LEARN),
                Route::page("others", PageRef::farmer("schemes-others"), C::LEARN),
            ]),
        ],
    )
}

fn officer_tree() -> RouteTree {
    use Capability as C;
    RouteTree::new(Role::Officer, PageRef::officer("dashboard"), C::VIEW_DASHBOARD).with_children(
        vec![
            Route::page(
                "advisory-management",
                PageRef::officer("advisory-management"),
                C::MANAGE_CONTENT,
            ),
            Route::page("alerts", PageRef::officer("alerts"), C::MONITOR),
            Route::page("crop-data", PageRef::officer("crop-data"), C::MONITOR),
            Route::page("farmer-queries", PageRef::officer("farmer-queries"), C::COMMUNITY),
            Route::page(
                "knowledge-base",
                PageRef::officer("knowledge-base"),
                C::MANAGE_CONTENT,
            ),
            Route::page(
                "reports-analytics",
                PageRef::officer("reports-analytics"),
                C::MONITOR,
            ),
            Route::page("profile", PageRef::officer("profile"), C::VIEW_DASHBOARD),
        ],
    )
}

fn admin_tree() -> RouteTree {
    use Capability as C;
    RouteTree::new(Role::Admin, PageRef::admin("dashboard"), C::VIEW_DASHBOARD).with_children(vec![
        Route::page("user-management", PageRef::admin("user-management"), C::MANAGE_USERS),
        Route::page(
            "officer-management",
            PageRef::admin("officer-management"),
            C::MANAGE_USERS,
        ),
        Route::page(
            "farmer-management",
            PageRef::admin("farmer-management"),
            C::MANAGE_USERS,
        ),
        Route::page("settings", PageRef::admin("settings"), C::ADMINISTER),
        Route::page("profile", PageRef::admin("profile"), C::VIEW_DASHBOARD),
    ])
}
