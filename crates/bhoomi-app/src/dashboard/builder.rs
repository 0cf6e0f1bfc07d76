//! Builder for [`Dashboard`].

use std::sync::Arc;

use bhoomi_routes::{RouteCatalog, RouteGate};
use bhoomi_session::{IdentityStream, ProfileStore, SessionMachine};
use bhoomi_shell::ShellController;
use tokio::sync::watch;
use tracing::info;

use super::{ChromeSet, Dashboard};
use crate::{BuildError, DashboardConfig};

/// Builder for [`Dashboard`].
///
/// The config is taken up front; an identity stream and a profile
/// store are required before [`build()`](Self::build).
///
/// # Example
///
/// ```
/// use bhoomi_app::{Dashboard, DashboardConfig};
/// use bhoomi_session::{IdentityHub, MemoryProfileStore};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let hub = Arc::new(IdentityHub::new());
/// let store = Arc::new(MemoryProfileStore::new());
/// let dashboard = Dashboard::builder(DashboardConfig::default())
///     .with_identity_stream(hub)
///     .with_profile_store(store)
///     .build()
///     .unwrap();
/// dashboard.shutdown().await;
/// # }
/// ```
pub struct DashboardBuilder {
    config: DashboardConfig,
    stream: Option<Arc<dyn IdentityStream>>,
    store: Option<Arc<dyn ProfileStore>>,
}

impl DashboardBuilder {
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            stream: None,
            store: None,
        }
    }

    /// Sets the source of identity provider events.
    #[must_use]
    pub fn with_identity_stream(mut self, stream: Arc<dyn IdentityStream>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Sets the profile lookup backend.
    #[must_use]
    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Assembles the dashboard: validates the catalog, spawns the
    /// session machine and the shell controller, and seeds the width
    /// source from the config.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if a required input is missing or the
    /// catalog fails validation.
    pub fn build(self) -> Result<Dashboard, BuildError> {
        let stream = self.stream.ok_or(BuildError::MissingIdentityStream)?;
        let store = self.store.ok_or(BuildError::MissingProfileStore)?;

        let catalog = RouteCatalog::with_surface(self.config.surface.clone());
        catalog.validate()?;
        let chromes = ChromeSet::new(catalog.protected_prefix());
        let gate = RouteGate::new(catalog);

        let session = SessionMachine::spawn(stream.as_ref(), store);
        let session_rx = session.watch();

        let (width_tx, width_rx) = watch::channel(self.config.shell.initial_width);
        let shell = ShellController::spawn(width_rx, self.config.shell);

        let current_path = self.config.surface.landing.clone();
        info!(
            session = %session.id(),
            width = self.config.shell.initial_width,
            landing = %current_path,
            "dashboard assembled"
        );

        Ok(Dashboard {
            config: self.config,
            gate,
            session,
            session_rx,
            shell,
            width_tx,
            chromes,
            current_path,
        })
    }
}
