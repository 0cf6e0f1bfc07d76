//! Role-scoped route trees.
//!
//! Each role owns one static tree of nested routes. Trees are
//! configuration, not state: built once by the catalog, then consulted
//! read-only by the gate. Resolution walks the tree segment-wise and
//! yields at most one [`RouteMatch`] — there is no merging, no
//! fallthrough inside a tree, and no backtracking (literal children are
//! preferred over a parameter child at the same level; declaring
//! overlapping siblings beyond that is a catalog defect, caught by
//! validation).

use crate::{Capability, PageRef};
use bhoomi_types::Role;
use std::collections::BTreeMap;

/// One step of a route's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this text.
    Literal(&'static str),
    /// Matches any single segment, binding it under the given name.
    Param(&'static str),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "{text}"),
            Segment::Param(name) => write!(f, ":{name}"),
        }
    }
}

/// A node in a role's route tree.
///
/// A node with a page mounts that page when the request ends here; a
/// node without one (`branch`) only groups children — requesting it
/// directly resolves to nothing, which the gate turns into the role's
/// index.
#[derive(Debug, Clone)]
pub struct Route {
    segment: Segment,
    page: Option<PageRef>,
    capability: Capability,
    children: Vec<Route>,
}

impl Route {
    /// A literal-segment route mounting `page`.
    #[must_use]
    pub fn page(segment: &'static str, page: PageRef, capability: Capability) -> Self {
        Self {
            segment: Segment::Literal(segment),
            page: Some(page),
            capability,
            children: Vec::new(),
        }
    }

    /// A parameter route mounting `page` with the segment bound as `name`.
    #[must_use]
    pub fn param(name: &'static str, page: PageRef, capability: Capability) -> Self {
        Self {
            segment: Segment::Param(name),
            page: Some(page),
            capability,
            children: Vec::new(),
        }
    }

    /// A grouping node with no page of its own.
    #[must_use]
    pub fn branch(segment: &'static str) -> Self {
        Self {
            segment: Segment::Literal(segment),
            page: None,
            capability: Capability::empty(),
            children: Vec::new(),
        }
    }

    /// Adds one child route.
    #[must_use]
    pub fn with_child(mut self, child: Route) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a batch of child routes, preserving order.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// The page this node mounts, if it mounts one.
    #[must_use]
    pub fn mounted_page(&self) -> Option<PageRef> {
        self.page
    }

    #[must_use]
    pub fn capability(&self) -> Capability {
        self.capability
    }

    #[must_use]
    pub fn children(&self) -> &[Route] {
        &self.children
    }
}

/// Result of resolving a path inside a role tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// The page to mount.
    pub page: PageRef,
    /// The functional area the route is tagged with.
    pub capability: Capability,
    /// Parameter bindings collected along the match, in name order.
    pub params: BTreeMap<&'static str, String>,
}

/// One declared route, flattened for listings and round-trip checks.
///
/// `path` is relative to the protected prefix; parameter segments keep
/// their `:name` form. The index route flattens to the empty path.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub path: String,
    pub page: PageRef,
    pub capability: Capability,
}

/// The full static tree for one role.
#[derive(Debug, Clone)]
pub struct RouteTree {
    role: Role,
    index: PageRef,
    index_capability: Capability,
    children: Vec<Route>,
}

impl RouteTree {
    /// Creates a tree whose empty path mounts `index`.
    #[must_use]
    pub fn new(role: Role, index: PageRef, index_capability: Capability) -> Self {
        Self {
            role,
            index,
            index_capability,
            children: Vec::new(),
        }
    }

    /// Adds top-level routes, preserving order.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Route>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// The role's default page, mounted for the empty path and for
    /// fallthrough.
    #[must_use]
    pub fn index(&self) -> RouteMatch {
        RouteMatch {
            page: self.index,
            capability: self.index_capability,
            params: BTreeMap::new(),
        }
    }

    /// Resolves path segments (already stripped of the protected
    /// prefix) to at most one match.
    ///
    /// Empty input resolves to the index. `None` means the path is not
    /// declared for this role — absence, not an error.
    #[must_use]
    pub fn resolve(&self, segments: &[&str]) -> Option<RouteMatch> {
        if segments.is_empty() {
            return Some(self.index());
        }
        resolve_in(&self.children, segments, BTreeMap::new())
    }

    /// Flattens the tree into declared entries, index first, then
    /// declaration order.
    #[must_use]
    pub fn entries(&self) -> Vec<RouteEntry> {
        let mut entries = vec![RouteEntry {
            path: String::new(),
            page: self.index,
            capability: self.index_capability,
        }];
        for route in &self.children {
            flatten_into(route, "", &mut entries);
        }
        entries
    }

    /// Top-level routes, in declaration order.
    #[must_use]
    pub fn children(&self) -> &[Route] {
        &self.children
    }
}

fn resolve_in(
    routes: &[Route],
    segments: &[&str],
    params: BTreeMap<&'static str, String>,
) -> Option<RouteMatch> {
    let (head, rest) = segments.split_first()?;

    let chosen = routes
        .iter()
        .find(|r| matches!(r.segment, Segment::Literal(text) if text == *head))
        .or_else(|| {
            routes
                .iter()
                .find(|r| matches!(r.segment, Segment::Param(_)))
        })?;

    let mut params = params;
    if let Segment::Param(name) = chosen.segment {
        params.insert(name, (*head).to_string());
    }

    if rest.is_empty() {
        chosen.page.map(|page| RouteMatch {
            page,
            capability: chosen.capability,
            params,
        })
    } else {
        resolve_in(&chosen.children, rest, params)
    }
}

fn flatten_into(route: &Route, parent: &str, entries: &mut Vec<RouteEntry>) {
    let path = if parent.is_empty() {
        route.segment.to_string()
    } else {
        format!("{parent}/{}", route.segment)
    };
    if let Some(page) = route.page {
        entries.push(RouteEntry {
            path: path.clone(),
            page,
            capability: route.capability,
        });
    }
    for child in &route.children {
        flatten_into(child, &path, entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> RouteTree {
        RouteTree::new(
            Role::Farmer,
            PageRef::farmer("dashboard"),
            Capability::VIEW_DASHBOARD,
        )
        .with_children(vec![
            Route::page("mandi", PageRef::farmer("mandi"), Capability::MARKET),
            Route::page("learning", PageRef::farmer("learning"), Capability::LEARN)
                .with_child(Route::param(
                    "id",
                    PageRef::farmer("learning-module"),
                    Capability::LEARN,
                )),
            Route::branch("commodity").with_child(Route::param(
                "name",
                PageRef::farmer("commodity-detail"),
                Capability::MARKET,
            )),
            Route::page("schemes", PageRef::farmer("schemes"), Capability::LEARN)
                .with_children(vec![
                    Route::page(
                        "irrigation",
                        PageRef::farmer("schemes-irrigation"),
                        Capability::LEARN,
                    ),
                    Route::page(
                        "machines",
                        PageRef::farmer("schemes-machines"),
                        Capability::LEARN,
                    ),
                ]),
        ])
    }

    #[test]
    fn empty_path_resolves_to_index() {
        let m = sample_tree().resolve(&[]).unwrap();
        assert_eq!(m.page, PageRef::farmer("dashboard"));
        assert!(m.params.is_empty());
    }

    #[test]
    fn single_level_literal() {
        let m = sample_tree().resolve(&["mandi"]).unwrap();
        assert_eq!(m.page, PageRef::farmer("mandi"));
        assert_eq!(m.capability, Capability::MARKET);
    }

    #[test]
    fn nested_route_has_own_index() {
        let tree = sample_tree();
        // The parent node mounts its own page...
        let parent = tree.resolve(&["schemes"]).unwrap();
        assert_eq!(parent.page, PageRef::farmer("schemes"));
        // ...and nesting reaches one level further down.
        let child = tree.resolve(&["schemes", "irrigation"]).unwrap();
        assert_eq!(child.page, PageRef::farmer("schemes-irrigation"));
    }

    #[test]
    fn param_binds_segment_value() {
        let m = sample_tree().resolve(&["learning", "drip-irrigation-101"]).unwrap();
        assert_eq!(m.page, PageRef::farmer("learning-module"));
        assert_eq!(m.params.get("id").map(String::as_str), Some("drip-irrigation-101"));
    }

    #[test]
    fn branch_without_page_does_not_mount() {
        let tree = sample_tree();
        // /commodity alone has no page; only /commodity/:name does.
        assert!(tree.resolve(&["commodity"]).is_none());
        let m = tree.resolve(&["commodity", "onion"]).unwrap();
        assert_eq!(m.page, PageRef::farmer("commodity-detail"));
        assert_eq!(m.params.get("name").map(String::as_str), Some("onion"));
    }

    #[test]
    fn undeclared_path_is_absent_not_error() {
        let tree = sample_tree();
        assert!(tree.resolve(&["user-management"]).is_none());
        assert!(tree.resolve(&["mandi", "extra"]).is_none());
        assert!(tree.resolve(&["schemes", "railways"]).is_none());
    }

    #[test]
    fn literal_preferred_over_param() {
        let tree = RouteTree::new(
            Role::Officer,
            PageRef::officer("dashboard"),
            Capability::VIEW_DASHBOARD,
        )
        .with_children(vec![Route::branch("kb").with_children(vec![
            Route::page("new", PageRef::officer("kb-new"), Capability::MANAGE_CONTENT),
            Route::param("id", PageRef::officer("kb-entry"), Capability::MANAGE_CONTENT),
        ])]);

        let m = tree.resolve(&["kb", "new"]).unwrap();
        assert_eq!(m.page, PageRef::officer("kb-new"));
        let m = tree.resolve(&["kb", "42"]).unwrap();
        assert_eq!(m.page, PageRef::officer("kb-entry"));
        assert_eq!(m.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn entries_flatten_in_declaration_order() {
        let entries = sample_tree().entries();
        let paths: Vec<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "",
                "mandi",
                "learning",
                "learning/:id",
                "commodity/:name",
                "schemes",
                "schemes/irrigation",
                "schemes/machines",
            ]
        );
    }

    #[test]
    fn every_entry_resolves_back_to_its_page() {
        let tree = sample_tree();
        for entry in tree.entries() {
            let concrete: Vec<String> = entry
                .path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(|s| {
                    if let Some(name) = s.strip_prefix(':') {
                        format!("sample-{name}")
                    } else {
                        s.to_string()
                    }
                })
                .collect();
            let segments: Vec<&str> = concrete.iter().map(String::as_str).collect();
            let m = tree
                .resolve(&segments)
                .unwrap_or_else(|| panic!("entry {:?} did not resolve", entry.path));
            assert_eq!(m.page, entry.page, "wrong page for {:?}", entry.path);
        }
    }
}
