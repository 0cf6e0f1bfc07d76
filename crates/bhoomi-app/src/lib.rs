//! Dashboard assembly for Bhoomi.
//!
//! This crate is the composition root of the library stack: it loads
//! configuration, wires the session machine to the route gate and the
//! shell controller, and answers every path request with a
//! [`ViewFrame`] ready to render.
//!
//! # Crate Architecture
//!
//! ```text
//! bhoomi-session   bhoomi-routes   bhoomi-shell
//!        │               │               │
//!        └───────────────┼───────────────┘
//!                        ▼
//!                   bhoomi-app  ◄── THIS CRATE
//!          (DashboardConfig → Dashboard → ViewFrame)
//!                        ▲
//!                   bhoomi-cli   (readline demo driver)
//! ```
//!
//! # Request Lifecycle
//!
//! ```text
//!  ConfigLoader ──► DashboardConfig ──► DashboardBuilder::build()
//!                                              │
//!                       ┌──────────────────────┤
//!                       ▼                      ▼
//!                SessionMachine          ShellController
//!                       │                      │
//!     navigate(path) ───┴──► RouteGate ────────┴──► ViewFrame
//! ```
//!
//! # Design Principles
//!
//! - **Frames are whole answers** — a [`ViewFrame`] carries the
//!   requested and resolved paths, the session snapshot it was admitted
//!   under, and the body to render. Redirects are followed before the
//!   frame is returned, never left to the caller.
//! - **Settled, not in-flight** — mutating methods wait for the owning
//!   task's publication before returning, so callers never observe a
//!   half-applied layout or session change.
//! - **Validation at assembly** — [`DashboardBuilder::build`] rejects a
//!   broken catalog or missing backend before any task is spawned.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod frame;

// Re-export core types
pub use config::{ConfigError, ConfigLoader, DashboardConfig};
pub use dashboard::{Dashboard, DashboardBuilder};
pub use error::BuildError;
pub use frame::{FrameBody, ViewFrame};

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_session::{IdentityHub, MemoryProfileStore};
    use std::sync::Arc;

    /// End-to-end shape check through the re-exported surface only.
    #[tokio::test]
    async fn public_surface_round_trip() {
        let config = ConfigLoader::new().skip_env_vars().load().unwrap();
        let mut dashboard = Dashboard::builder(config)
            .with_identity_stream(Arc::new(IdentityHub::new()))
            .with_profile_store(Arc::new(MemoryProfileStore::new()))
            .build()
            .unwrap();

        let frame = dashboard.navigate("/dashboard/weather").await;
        assert!(matches!(frame.body(), FrameBody::Loading));
        assert_eq!(frame.resolved().as_str(), "/dashboard/weather");

        dashboard.shutdown().await;
    }
}
