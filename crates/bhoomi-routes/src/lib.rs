//! Route configuration and the authorization gate for the Bhoomi
//! dashboard.
//!
//! The session layer answers *who*; this crate answers *where they may
//! go*. Route trees are immutable configuration built once at startup;
//! the gate is a pure function from (session snapshot, path) to an
//! outcome.
//!
//! # Crate Architecture
//!
//! ```text
//! bhoomi-session  (SessionState snapshots)
//!       │
//!       ▼
//! bhoomi-routes  ◄── THIS CRATE
//!  RoutePath ──► RouteGate ──► GateOutcome
//!                   │
//!                   └── RouteCatalog
//!                        ├── public surface (landing, sign-in, register)
//!                        └── RouteTree × {farmer, officer, admin}
//!                             └── Route (nested, capability-tagged)
//! ```
//!
//! # Outcomes
//!
//! | Session phase | Path | Outcome |
//! |---------------|------|---------|
//! | any | public | [`GateOutcome::Public`] |
//! | Resolving | anything else | [`GateOutcome::Loading`] |
//! | Unauthenticated | protected | [`GateOutcome::RedirectToSignIn`] |
//! | Unauthenticated | unknown | [`GateOutcome::RedirectToLanding`] |
//! | Authenticated | in role tree | [`GateOutcome::Mount`] |
//! | Authenticated | other role's / undeclared | [`GateOutcome::Mount`] (role index) |
//! | Authenticated | outside prefix, unknown | [`GateOutcome::RedirectToLanding`] |
//!
//! # Design Principles
//!
//! - **One tree per role, never merged** — selection happens once, by
//!   role; capability tags keep each tree inside its role's grant but
//!   are not per-request checks.
//! - **Absence, not errors** — a path missing from the session's tree
//!   mounts the role index; only paths unknown *everywhere* hit the
//!   landing catch-all.
//! - **Validation at startup** — [`RouteCatalog::validate`] rejects
//!   authoring defects before any request is gated.

pub mod capability;
pub mod catalog;
pub mod gate;
pub mod page;
pub mod path;
pub mod tree;

// Re-export core types
pub use capability::Capability;
pub use catalog::{validate_tree, CatalogError, PublicSurface, RouteCatalog};
pub use gate::{GateOutcome, RouteGate};
pub use page::{PageArea, PageRef};
pub use path::RoutePath;
pub use tree::{Route, RouteEntry, RouteMatch, RouteTree, Segment};
