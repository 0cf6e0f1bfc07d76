//! The authorization gate.
//!
//! One pure decision: given the latest session snapshot and a requested
//! path, what does the surface show? The gate never mutates session
//! state and never blocks — it reads the snapshot the session machine
//! published and consults the static catalog.
//!
//! # Decision Order
//!
//! ```text
//! public path?            ──► Public(page)            (any phase)
//! phase = Resolving       ──► Loading                 (no matching at all)
//! phase = Unauthenticated ──► protected? RedirectToSignIn : RedirectToLanding
//! phase = Authenticated   ──► protected? resolve-in-role-tree : RedirectToLanding
//!                              └─ undeclared path ──► Mount(role index)
//! ```
//!
//! Two deliberate asymmetries:
//!
//! - While resolving, *nothing* except the public surface renders — not
//!   even the catch-all redirect. A reload deep inside the dashboard
//!   must not flash the landing page while the session is still being
//!   reconstructed.
//! - A signed-in principal requesting another role's path is not an
//!   error and not a redirect: the path simply does not exist in their
//!   tree, and they land on their own index.

use crate::{PageRef, RouteCatalog, RouteMatch, RoutePath};
use bhoomi_session::{SessionState, UnauthReason};
use bhoomi_types::Role;
use tracing::debug;

/// What the surface shows for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Session still resolving: neutral placeholder, no routing.
    Loading,
    /// A public page, reachable in any phase.
    Public(PageRef),
    /// Protected path without a session; the requested path is
    /// discarded, only the reason travels.
    RedirectToSignIn { reason: UnauthReason },
    /// Path unknown everywhere: catch-all to the landing page.
    RedirectToLanding,
    /// An authorized page in the session role's tree.
    Mount { role: Role, matched: RouteMatch },
}

impl GateOutcome {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, GateOutcome::Loading)
    }

    /// The page this outcome shows, when it shows one.
    #[must_use]
    pub fn mounted_page(&self) -> Option<PageRef> {
        match self {
            GateOutcome::Public(page) => Some(*page),
            GateOutcome::Mount { matched, .. } => Some(matched.page),
            _ => None,
        }
    }
}

/// Gate over one catalog.
///
/// Cheap to share: construct once next to the catalog, call
/// [`admit`](Self::admit) per navigation.
#[derive(Debug, Clone)]
pub struct RouteGate {
    catalog: RouteCatalog,
}

impl RouteGate {
    #[must_use]
    pub fn new(catalog: RouteCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    /// Decides what the surface shows for `path` under `state`.
    #[must_use]
    pub fn admit(&self, state: &SessionState, path: &RoutePath) -> GateOutcome {
        if let Some(page) = self.catalog.public_page(path) {
            return GateOutcome::Public(page);
        }

        match state {
            SessionState::Resolving => GateOutcome::Loading,
            SessionState::Unauthenticated { reason } => {
                if self.catalog.is_protected(path) {
                    debug!(%path, reason = %reason, "protected path without session");
                    GateOutcome::RedirectToSignIn { reason: *reason }
                } else {
                    GateOutcome::RedirectToLanding
                }
            }
            SessionState::Authenticated { role, .. } => {
                let Some(rest) = path.strip_prefix(self.catalog.protected_prefix()) else {
                    return GateOutcome::RedirectToLanding;
                };
                let tree = self.catalog.tree_for(*role);
                let matched = match tree.resolve(&rest) {
                    Some(matched) => matched,
                    None => {
                        debug!(%path, role = %role, "path not in role tree; mounting index");
                        tree.index()
                    }
                };
                GateOutcome::Mount {
                    role: *role,
                    matched,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, PageRef};
    use bhoomi_session::UnauthReason;
    use bhoomi_types::{Principal, PrincipalId, Profile, Role};

    fn gate() -> RouteGate {
        RouteGate::new(RouteCatalog::standard())
    }

    fn authenticated(role: Role) -> SessionState {
        SessionState::Authenticated {
            principal: Principal::new(PrincipalId::new("uid-1")),
            role,
            profile: Profile::new(role),
        }
    }

    fn unauthenticated(reason: UnauthReason) -> SessionState {
        SessionState::Unauthenticated { reason }
    }

    fn path(p: &str) -> RoutePath {
        RoutePath::parse(p)
    }

    #[test]
    fn resolving_protected_path_shows_loading() {
        let gate = gate();
        assert_eq!(
            gate.admit(&SessionState::Resolving, &path("/dashboard")),
            GateOutcome::Loading
        );
        assert_eq!(
            gate.admit(&SessionState::Resolving, &path("/dashboard/mandi")),
            GateOutcome::Loading
        );
    }

    #[test]
    fn resolving_defers_even_the_catch_all() {
        // A reload mid-resolution must not flash the landing redirect.
        assert_eq!(
            gate().admit(&SessionState::Resolving, &path("/no-such-page")),
            GateOutcome::Loading
        );
    }

    #[test]
    fn public_surface_reachable_in_every_phase() {
        let gate = gate();
        let sign_in = path("/auth");
        for state in [
            SessionState::Resolving,
            unauthenticated(UnauthReason::SignedOut),
            authenticated(Role::Farmer),
        ] {
            assert_eq!(
                gate.admit(&state, &sign_in),
                GateOutcome::Public(PageRef::public("sign-in")),
                "sign-in blocked during {:?}",
                state.phase()
            );
        }
        assert_eq!(
            gate.admit(&SessionState::Resolving, &path("/")),
            GateOutcome::Public(PageRef::public("landing"))
        );
    }

    #[test]
    fn signed_out_protected_path_redirects_to_sign_in() {
        let outcome = gate().admit(
            &unauthenticated(UnauthReason::SignedOut),
            &path("/dashboard/anything"),
        );
        assert_eq!(
            outcome,
            GateOutcome::RedirectToSignIn {
                reason: UnauthReason::SignedOut
            }
        );
    }

    #[test]
    fn redirect_carries_the_unauthenticated_reason() {
        let outcome = gate().admit(
            &unauthenticated(UnauthReason::LookupFailed),
            &path("/dashboard"),
        );
        let GateOutcome::RedirectToSignIn { reason } = outcome else {
            panic!("expected sign-in redirect, got {outcome:?}");
        };
        assert!(reason.is_retryable());
    }

    #[test]
    fn unauthenticated_unknown_path_lands() {
        assert_eq!(
            gate().admit(&unauthenticated(UnauthReason::SignedOut), &path("/pricing")),
            GateOutcome::RedirectToLanding
        );
    }

    #[test]
    fn authenticated_mounts_declared_routes() {
        let gate = gate();
        let outcome = gate.admit(&authenticated(Role::Officer), &path("/dashboard"));
        let GateOutcome::Mount { role, matched } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(role, Role::Officer);
        assert_eq!(matched.page, PageRef::officer("dashboard"));

        let outcome = gate.admit(&authenticated(Role::Officer), &path("/dashboard/crop-data"));
        let GateOutcome::Mount { matched, .. } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(matched.page, PageRef::officer("crop-data"));
        assert_eq!(matched.capability, Capability::MONITOR);
    }

    #[test]
    fn cross_role_path_falls_through_to_own_index() {
        let gate = gate();

        // Officer requesting an admin-only page sees the officer index.
        let outcome = gate.admit(
            &authenticated(Role::Officer),
            &path("/dashboard/user-management"),
        );
        let GateOutcome::Mount { role, matched } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(role, Role::Officer);
        assert_eq!(matched.page, PageRef::officer("dashboard"));

        // Farmer requesting an officer-only page sees the farmer index.
        let outcome = gate.admit(
            &authenticated(Role::Farmer),
            &path("/dashboard/advisory-management"),
        );
        let GateOutcome::Mount { matched, .. } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(matched.page, PageRef::farmer("dashboard"));
    }

    #[test]
    fn authenticated_unknown_path_redirects_to_landing() {
        assert_eq!(
            gate().admit(&authenticated(Role::Farmer), &path("/elsewhere")),
            GateOutcome::RedirectToLanding
        );
    }

    #[test]
    fn params_flow_through_the_mount() {
        let outcome = gate().admit(
            &authenticated(Role::Farmer),
            &path("/dashboard/commodity/onion"),
        );
        let GateOutcome::Mount { matched, .. } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(matched.page, PageRef::farmer("commodity-prices"));
        assert_eq!(matched.params.get("name").map(String::as_str), Some("onion"));
    }

    #[test]
    fn nested_scheme_routes_mount() {
        let outcome = gate().admit(
            &authenticated(Role::Farmer),
            &path("/dashboard/schemes/machines"),
        );
        let GateOutcome::Mount { matched, .. } = outcome else {
            panic!("expected mount");
        };
        assert_eq!(matched.page, PageRef::farmer("schemes-machines"));
    }

    #[test]
    fn mount_page_helper_reads_through() {
        let gate = gate();
        let outcome = gate.admit(&authenticated(Role::Admin), &path("/dashboard/settings"));
        assert_eq!(outcome.mounted_page(), Some(PageRef::admin("settings")));
        assert_eq!(
            gate.admit(&SessionState::Resolving, &path("/dashboard"))
                .mounted_page(),
            None
        );
    }
}
