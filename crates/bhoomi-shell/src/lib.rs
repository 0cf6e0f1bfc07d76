//! Shell chrome and responsive state for the Bhoomi dashboard.
//!
//! Once the gate mounts a role subtree, this crate decides what wraps
//! it: which sidebar inventory and accent ([`Chrome`], fixed per role)
//! and how the sidebar behaves across viewport changes
//! ([`ShellController`], one task per mounted shell).
//!
//! # Crate Architecture
//!
//! ```text
//!        width source (watch<u32>)
//!               │
//!               ▼
//!        ShellController ──► watch<ShellSnapshot>
//!               ▲                   {viewport, sidebar_open}
//!    toggle / navigated / dismiss
//!
//!        Role ──► Chrome {accent, nav items, bottom tabs}
//! ```
//!
//! The two halves meet only at render time: the surface draws
//! [`Chrome`] for the session's role in the state [`ShellSnapshot`]
//! describes. Neither half reads session state — the app layer passes
//! the role in.

pub mod chrome;
pub mod controller;
pub mod viewport;

// Re-export core types
pub use chrome::{Accent, Chrome, NavItem, BOTTOM_TAB_COUNT};
pub use controller::{ShellController, ShellHandle, ShellSnapshot};
pub use viewport::{ShellConfig, ViewportClass, DEFAULT_INITIAL_WIDTH, DEFAULT_MOBILE_BREAKPOINT};
