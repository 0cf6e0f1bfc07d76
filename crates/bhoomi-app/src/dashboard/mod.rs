//! Dashboard assembly.
//!
//! Wires one session machine, one route gate, and one shell controller
//! behind a single façade, and answers path requests with
//! [`ViewFrame`]s.
//!
//! ```text
//!    IdentityStream      ProfileStore           width source
//!          │                  │                      │
//!          ▼                  ▼                      ▼
//!    ┌─────────────────────────────┐       ┌──────────────────┐
//!    │       SessionMachine        │       │ ShellController  │
//!    └──────────────┬──────────────┘       └────────┬─────────┘
//!                   │ SessionState (watch)          │ ShellSnapshot
//!                   ▼                               │
//!    navigate ─► ┌───────────┐  GateOutcome         │
//!    refresh  ─► │ RouteGate │ ───────────┐         │
//!                └───────────┘            ▼         ▼
//!                                      ┌──────────────┐
//!                                      │  ViewFrame   │
//!                                      └──────────────┘
//! ```
//!
//! # Outcome → Frame
//!
//! | Gate outcome        | Frame body             | Path afterwards |
//! |---------------------|------------------------|-----------------|
//! | `Loading`           | splash                 | requested       |
//! | `Public`            | public page            | requested       |
//! | `RedirectToSignIn`  | sign-in page + notice  | sign-in path    |
//! | `RedirectToLanding` | landing page           | landing path    |
//! | `Mount`             | role page in chrome    | requested       |
//!
//! The dashboard owns the width source and a private session receiver,
//! so every mutating method can trigger a change and wait for the
//! owning task's publication before returning — callers see settled
//! snapshots, never in-flight ones.

mod builder;

pub use builder::DashboardBuilder;

use std::sync::Arc;
use std::time::Duration;

use bhoomi_routes::{GateOutcome, PageRef, RouteCatalog, RouteGate, RoutePath};
use bhoomi_session::{SessionHandle, SessionPhase, SessionState};
use bhoomi_shell::{Chrome, ShellHandle, ShellSnapshot, ViewportClass};
use bhoomi_types::Role;
use tokio::sync::watch;
use tokio::time::timeout;
use tracing::debug;

use crate::{DashboardConfig, FrameBody, ViewFrame};

/// Upper bound on waiting for the shell task to publish after a
/// triggered layout change. Only scheduling delay lands here; the
/// publication itself is guaranteed.
const SYNC_WINDOW: Duration = Duration::from_millis(500);

/// Upper bound on waiting for the session machine to settle. Covers
/// profile-store latency, so it is wider than [`SYNC_WINDOW`].
const SETTLE_WINDOW: Duration = Duration::from_secs(2);

/// Per-role chrome, built once at assembly and shared into frames.
#[derive(Debug)]
struct ChromeSet {
    farmer: Arc<Chrome>,
    officer: Arc<Chrome>,
    admin: Arc<Chrome>,
}

impl ChromeSet {
    fn new(prefix: &RoutePath) -> Self {
        Self {
            farmer: Arc::new(Chrome::for_role(Role::Farmer, prefix)),
            officer: Arc::new(Chrome::for_role(Role::Officer, prefix)),
            admin: Arc::new(Chrome::for_role(Role::Admin, prefix)),
        }
    }

    fn for_role(&self, role: Role) -> Arc<Chrome> {
        match role {
            Role::Farmer => Arc::clone(&self.farmer),
            Role::Officer => Arc::clone(&self.officer),
            Role::Admin => Arc::clone(&self.admin),
        }
    }
}

/// The assembled dashboard.
///
/// Mutating methods take `&mut self`; one caller drives the dashboard
/// at a time, which is the demo driver's shape.
#[derive(Debug)]
pub struct Dashboard {
    /// Loaded configuration.
    config: DashboardConfig,
    /// Gate over the validated catalog.
    gate: RouteGate,
    /// Session machine handle.
    session: SessionHandle,
    /// Private receiver used to synchronize on machine publications.
    session_rx: watch::Receiver<SessionState>,
    /// Shell controller handle.
    shell: ShellHandle,
    /// Width source feeding the shell controller.
    width_tx: watch::Sender<u32>,
    /// Per-role chrome.
    chromes: ChromeSet,
    /// The path the dashboard currently shows.
    current_path: RoutePath,
}

impl Dashboard {
    /// Creates a builder over `config`.
    #[must_use]
    pub fn builder(config: DashboardConfig) -> DashboardBuilder {
        DashboardBuilder::new(config)
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &RouteCatalog {
        self.gate.catalog()
    }

    #[must_use]
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// The path the dashboard currently shows (post-redirect).
    #[must_use]
    pub fn current_path(&self) -> &RoutePath {
        &self.current_path
    }

    #[must_use]
    pub fn shell_snapshot(&self) -> ShellSnapshot {
        self.shell.snapshot()
    }

    /// Follows a navigation to `path` and returns the resulting frame.
    ///
    /// Redirects are followed immediately; the frame records both the
    /// requested and the resolved path. On a mount the shell is told a
    /// nav link was followed, which auto-closes a mobile sidebar.
    pub async fn navigate(&mut self, path: impl Into<RoutePath>) -> ViewFrame {
        self.admit(path.into(), true).await
    }

    /// Re-renders the current path under the current session without
    /// nav side effects. Call after the session changes.
    pub async fn refresh(&mut self) -> ViewFrame {
        let requested = self.current_path.clone();
        self.admit(requested, false).await
    }

    async fn admit(&mut self, requested: RoutePath, follow: bool) -> ViewFrame {
        let state = self.session.state();
        match self.gate.admit(&state, &requested) {
            GateOutcome::Loading => {
                self.current_path = requested.clone();
                ViewFrame::new(requested.clone(), requested, state, FrameBody::Loading)
            }
            GateOutcome::Public(page) => {
                self.current_path = requested.clone();
                ViewFrame::new(
                    requested.clone(),
                    requested,
                    state,
                    FrameBody::Public { page, notice: None },
                )
            }
            GateOutcome::RedirectToSignIn { reason } => {
                let resolved = self.config.surface.sign_in.clone();
                debug!(from = %requested, to = %resolved, reason = %reason, "redirect to sign-in");
                // Surface paths always match the public surface.
                let page = self
                    .gate
                    .catalog()
                    .public_page(&resolved)
                    .unwrap_or(PageRef::public("sign-in"));
                self.current_path = resolved.clone();
                ViewFrame::new(
                    requested,
                    resolved,
                    state,
                    FrameBody::Public {
                        page,
                        notice: Some(reason),
                    },
                )
            }
            GateOutcome::RedirectToLanding => {
                let resolved = self.config.surface.landing.clone();
                debug!(from = %requested, to = %resolved, "redirect to landing");
                let page = self
                    .gate
                    .catalog()
                    .public_page(&resolved)
                    .unwrap_or(PageRef::public("landing"));
                self.current_path = resolved.clone();
                ViewFrame::new(
                    requested,
                    resolved,
                    state,
                    FrameBody::Public { page, notice: None },
                )
            }
            GateOutcome::Mount { role, matched } => {
                self.current_path = requested.clone();
                if follow {
                    self.follow_into_shell().await;
                }
                let chrome = self.chromes.for_role(role);
                let layout = self.shell.snapshot();
                ViewFrame::new(
                    requested.clone(),
                    requested,
                    state,
                    FrameBody::Shell {
                        role,
                        matched,
                        chrome,
                        layout,
                    },
                )
            }
        }
    }

    /// Reports a nav follow to the shell; when the sidebar will
    /// auto-close (the scrim is up), waits for the updated layout.
    async fn follow_into_shell(&mut self) {
        let closing = self.shell.snapshot().scrim_visible();
        let mut rx = self.shell.watch();
        let _ = rx.borrow_and_update();
        if self.shell.navigated().await && closing {
            let _ = timeout(SYNC_WINDOW, rx.changed()).await;
        }
    }

    /// Applies a new viewport width and returns the settled layout.
    pub async fn resize(&mut self, width: u32) -> ShellSnapshot {
        let before = self.shell.snapshot();
        let crossing = ViewportClass::classify(width, self.config.shell.mobile_breakpoint)
            != before.viewport;
        let mut rx = self.shell.watch();
        let _ = rx.borrow_and_update();
        self.width_tx.send_replace(width);
        // Within-class resizes publish nothing; only wait on a crossing.
        if crossing {
            let _ = timeout(SYNC_WINDOW, rx.changed()).await;
        }
        self.shell.snapshot()
    }

    /// Toggles the sidebar and returns the settled layout.
    pub async fn toggle_sidebar(&mut self) -> ShellSnapshot {
        let mut rx = self.shell.watch();
        let _ = rx.borrow_and_update();
        if self.shell.toggle_sidebar().await {
            let _ = timeout(SYNC_WINDOW, rx.changed()).await;
        }
        self.shell.snapshot()
    }

    /// Dismisses the mobile scrim and returns the settled layout.
    pub async fn dismiss_scrim(&mut self) -> ShellSnapshot {
        let dismissing = self.shell.snapshot().scrim_visible();
        let mut rx = self.shell.watch();
        let _ = rx.borrow_and_update();
        if self.shell.dismiss_scrim().await && dismissing {
            let _ = timeout(SYNC_WINDOW, rx.changed()).await;
        }
        self.shell.snapshot()
    }

    /// Waits for the session machine's next publication and returns the
    /// settled state. Call after driving the identity stream.
    ///
    /// Every stream event produces exactly one publication, so this
    /// returns as soon as the machine finishes the resolution the
    /// caller just triggered. The window only bounds a call made with
    /// no event in flight.
    pub async fn settle(&mut self) -> SessionState {
        let deadline = tokio::time::Instant::now() + SETTLE_WINDOW;
        while let Ok(Ok(())) =
            tokio::time::timeout_at(deadline, self.session_rx.changed()).await
        {
            let state = self.session_rx.borrow_and_update().clone();
            if state.phase() != SessionPhase::Resolving {
                return state;
            }
        }
        self.session_rx.borrow_and_update().clone()
    }

    /// Asks the machine to re-run resolution and returns the state
    /// after its next publication.
    pub async fn retry(&mut self) -> SessionState {
        let _ = self.session_rx.borrow_and_update();
        if self.session.retry().await {
            let _ = timeout(SETTLE_WINDOW, self.session_rx.changed()).await;
        }
        self.session_rx.borrow_and_update().clone()
    }

    /// Stops the session machine and the shell controller.
    pub async fn shutdown(self) {
        self.session.shutdown().await;
        self.shell.shutdown().await;
    }
}
