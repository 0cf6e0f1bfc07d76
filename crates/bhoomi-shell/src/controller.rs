//! Responsive shell state.
//!
//! One spawned task per mounted shell owns `{viewport, sidebar_open}`
//! and is its only writer. The width source is a watch channel — the
//! reactive stand-in for a resize listener — subscribed exactly once
//! for the shell's lifetime and released on teardown.
//!
//! Sidebar policy:
//!
//! - entering a viewport class resets the sidebar to that class's
//!   default (desktop docked open, mobile closed);
//! - a resize *within* a class never touches the sidebar, so a manual
//!   toggle survives same-class resizes;
//! - on mobile, an open sidebar implies a scrim, and navigating or
//!   dismissing the scrim closes it;
//! - on desktop the sidebar is docked: navigation leaves it alone and
//!   no scrim exists.

use crate::{ShellConfig, ViewportClass};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// The shell state the surface renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShellSnapshot {
    pub viewport: ViewportClass,
    pub sidebar_open: bool,
}

impl ShellSnapshot {
    /// The dismissible overlay behind a mobile sidebar. Never shown on
    /// desktop.
    #[must_use]
    pub fn scrim_visible(&self) -> bool {
        self.viewport.is_mobile() && self.sidebar_open
    }
}

#[derive(Debug)]
enum ShellCommand {
    ToggleSidebar,
    /// A nav link was followed.
    Navigated,
    DismissScrim,
    Shutdown,
}

/// The shell state task. Constructed and spawned through
/// [`ShellController::spawn`].
pub struct ShellController {
    breakpoint: u32,
    width_rx: watch::Receiver<u32>,
    snapshot_tx: watch::Sender<ShellSnapshot>,
    commands: mpsc::Receiver<ShellCommand>,
}

impl ShellController {
    /// Starts the controller over a width source.
    ///
    /// The initial snapshot derives from the width the source currently
    /// reports.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(mut width_rx: watch::Receiver<u32>, config: ShellConfig) -> ShellHandle {
        let breakpoint = config.mobile_breakpoint;
        let viewport = ViewportClass::classify(*width_rx.borrow_and_update(), breakpoint);
        let initial = ShellSnapshot {
            viewport,
            sidebar_open: viewport.default_sidebar_open(),
        };
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);

        let controller = ShellController {
            breakpoint,
            width_rx,
            snapshot_tx,
            commands: cmd_rx,
        };
        let task = tokio::spawn(controller.run(initial));

        ShellHandle {
            snapshot_rx,
            commands: cmd_tx,
            task: Some(task),
        }
    }

    async fn run(self, initial: ShellSnapshot) {
        let ShellController {
            breakpoint,
            mut width_rx,
            snapshot_tx,
            mut commands,
        } = self;

        info!(viewport = %initial.viewport, "shell controller started");
        let mut snapshot = initial;

        loop {
            tokio::select! {
                biased;
                cmd = commands.recv() => match cmd {
                    Some(ShellCommand::ToggleSidebar) => {
                        snapshot.sidebar_open = !snapshot.sidebar_open;
                        snapshot_tx.send_replace(snapshot);
                    }
                    Some(ShellCommand::Navigated) => {
                        // Mobile: following a link puts content first.
                        if snapshot.viewport.is_mobile() && snapshot.sidebar_open {
                            snapshot.sidebar_open = false;
                            snapshot_tx.send_replace(snapshot);
                        }
                    }
                    Some(ShellCommand::DismissScrim) => {
                        if snapshot.scrim_visible() {
                            snapshot.sidebar_open = false;
                            snapshot_tx.send_replace(snapshot);
                        }
                    }
                    Some(ShellCommand::Shutdown) | None => break,
                },
                changed = width_rx.changed() => match changed {
                    Ok(()) => {
                        let width = *width_rx.borrow_and_update();
                        let class = ViewportClass::classify(width, breakpoint);
                        if class != snapshot.viewport {
                            debug!(width, from = %snapshot.viewport, to = %class, "breakpoint crossed");
                            snapshot = ShellSnapshot {
                                viewport: class,
                                sidebar_open: class.default_sidebar_open(),
                            };
                            snapshot_tx.send_replace(snapshot);
                        }
                    }
                    // Width source gone: the shell is unmounted.
                    Err(_) => break,
                },
            }
        }

        debug!("shell controller stopped");
    }
}

/// Handle to a running shell controller.
///
/// Dropping it aborts the task; [`shutdown`](Self::shutdown) stops it
/// gracefully. Either way the width subscription is released.
#[derive(Debug)]
pub struct ShellHandle {
    snapshot_rx: watch::Receiver<ShellSnapshot>,
    commands: mpsc::Sender<ShellCommand>,
    task: Option<JoinHandle<()>>,
}

impl ShellHandle {
    /// The latest shell snapshot.
    #[must_use]
    pub fn snapshot(&self) -> ShellSnapshot {
        *self.snapshot_rx.borrow()
    }

    /// A receiver observing every published snapshot.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<ShellSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Toggles the sidebar. Returns `false` if the controller stopped.
    pub async fn toggle_sidebar(&self) -> bool {
        self.commands.send(ShellCommand::ToggleSidebar).await.is_ok()
    }

    /// Reports that a nav link was followed.
    pub async fn navigated(&self) -> bool {
        self.commands.send(ShellCommand::Navigated).await.is_ok()
    }

    /// Dismisses the mobile scrim.
    pub async fn dismiss_scrim(&self) -> bool {
        self.commands.send(ShellCommand::DismissScrim).await.is_ok()
    }

    /// Stops the controller and waits for the task to finish.
    pub async fn shutdown(mut self) {
        let _ = self.commands.send(ShellCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for ShellHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    fn desktop_width() -> (watch::Sender<u32>, watch::Receiver<u32>) {
        watch::channel(1024)
    }

    fn mobile_width() -> (watch::Sender<u32>, watch::Receiver<u32>) {
        watch::channel(375)
    }

    async fn next_snapshot(rx: &mut watch::Receiver<ShellSnapshot>) -> ShellSnapshot {
        timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("no snapshot published")
            .expect("controller stopped");
        *rx.borrow_and_update()
    }

    #[tokio::test]
    async fn desktop_starts_docked_open() {
        let (_tx, rx) = desktop_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let snap = shell.snapshot();
        assert_eq!(snap.viewport, ViewportClass::Desktop);
        assert!(snap.sidebar_open);
        assert!(!snap.scrim_visible());
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn mobile_starts_closed() {
        let (_tx, rx) = mobile_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let snap = shell.snapshot();
        assert_eq!(snap.viewport, ViewportClass::Mobile);
        assert!(!snap.sidebar_open);
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn mobile_toggle_shows_scrim_and_dismiss_closes() {
        let (_tx, rx) = mobile_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();
        let _ = snaps.borrow_and_update();

        assert!(shell.toggle_sidebar().await);
        let snap = next_snapshot(&mut snaps).await;
        assert!(snap.sidebar_open);
        assert!(snap.scrim_visible());

        assert!(shell.dismiss_scrim().await);
        let snap = next_snapshot(&mut snaps).await;
        assert!(!snap.sidebar_open);
        assert!(!snap.scrim_visible());
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn navigating_closes_mobile_sidebar() {
        let (_tx, rx) = mobile_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();
        let _ = snaps.borrow_and_update();

        shell.toggle_sidebar().await;
        assert!(next_snapshot(&mut snaps).await.sidebar_open);

        shell.navigated().await;
        assert!(!next_snapshot(&mut snaps).await.sidebar_open);
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn desktop_sidebar_stays_docked_across_navigation() {
        let (_tx, rx) = desktop_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());

        shell.navigated().await;
        shell.dismiss_scrim().await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(shell.snapshot().sidebar_open, "docked sidebar was closed");
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn breakpoint_crossing_resets_defaults() {
        let (tx, rx) = desktop_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();
        let _ = snaps.borrow_and_update();

        tx.send_replace(375);
        let snap = next_snapshot(&mut snaps).await;
        assert_eq!(snap.viewport, ViewportClass::Mobile);
        assert!(!snap.sidebar_open);

        tx.send_replace(1280);
        let snap = next_snapshot(&mut snaps).await;
        assert_eq!(snap.viewport, ViewportClass::Desktop);
        assert!(snap.sidebar_open);
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn same_class_resize_preserves_manual_state() {
        let (tx, rx) = desktop_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();
        let _ = snaps.borrow_and_update();

        // Manually close on desktop, then resize within desktop.
        shell.toggle_sidebar().await;
        assert!(!next_snapshot(&mut snaps).await.sidebar_open);

        tx.send_replace(1100);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(
            !shell.snapshot().sidebar_open,
            "same-class resize re-asserted the default"
        );
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn custom_breakpoint_is_honored() {
        let (_tx, rx) = watch::channel(800);
        let shell = ShellController::spawn(
            rx,
            ShellConfig {
                mobile_breakpoint: 900,
                ..ShellConfig::default()
            },
        );
        assert_eq!(shell.snapshot().viewport, ViewportClass::Mobile);
        shell.shutdown().await;
    }

    #[tokio::test]
    async fn teardown_releases_width_subscription() {
        let (tx, rx) = desktop_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();
        assert_eq!(tx.receiver_count(), 1);

        shell.shutdown().await;
        assert_eq!(tx.receiver_count(), 0, "width subscription leaked");
        let closed = timeout(Duration::from_secs(1), snaps.changed()).await;
        assert!(matches!(closed, Ok(Err(_))), "snapshot channel still open");
    }

    #[tokio::test]
    async fn width_source_dropping_stops_controller() {
        let (tx, rx) = mobile_width();
        let shell = ShellController::spawn(rx, ShellConfig::default());
        let mut snaps = shell.watch();

        drop(tx);
        let closed = timeout(Duration::from_secs(1), snaps.changed()).await;
        assert!(matches!(closed, Ok(Err(_))));
        drop(shell);
    }
}
