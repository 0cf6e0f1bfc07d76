//! The demo driver: seeded backends, command dispatch, and the
//! interactive loop.
//!
//! The driver owns an assembled [`Dashboard`] plus the two in-memory
//! backends behind it (identity hub, profile store) and plays the part
//! of the browser host: entered lines become identity events,
//! navigations, and layout changes, and every answer is printed as the
//! frame's text form.
//!
//! # Input Flow
//!
//! ```text
//! stdin ──► readline thread ──► ReadlineEvent ──► handle_line()
//!                                                     │
//!                              ┌──────────────────────┤
//!                              ▼                      ▼
//!                        IdentityHub /          Dashboard
//!                        MemoryProfileStore     (navigate, resize, …)
//!                              │                      │
//!                              └──────► ViewFrame ◄───┘
//!                                          │
//!                                          ▼
//!                                        stdout
//! ```
//!
//! The readline thread holds the next prompt until the line it sent has
//! been fully handled, so output never interleaves with a redraw.

use std::sync::Arc;

use bhoomi_app::{BuildError, Dashboard, DashboardConfig};
use bhoomi_session::{IdentityHub, MemoryProfileStore, SessionState};
use bhoomi_shell::ShellSnapshot;
use bhoomi_types::{Principal, PrincipalId, Profile, Role};
use serde_json::json;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::command::Command;

/// Control flow for the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    /// Continue processing input.
    Continue,
    /// Exit the loop (quit command).
    Exit,
}

/// Event sent from the dedicated readline OS thread to the async loop.
#[derive(Debug)]
enum ReadlineEvent {
    /// User entered a line of text.
    Line(String),
    /// EOF (Ctrl+D on empty line, or stdin closed).
    Eof,
}

/// The interactive demo driver.
pub struct DemoDriver {
    dashboard: Dashboard,
    hub: Arc<IdentityHub>,
    store: Arc<MemoryProfileStore>,
    /// Set when a command failed; script mode turns it into exit code 1.
    failed: bool,
}

impl DemoDriver {
    /// Assembles a dashboard over freshly seeded in-memory backends.
    pub fn assemble(config: DashboardConfig) -> Result<Self, BuildError> {
        let hub = Arc::new(IdentityHub::new());
        let store = Arc::new(seeded_store());
        let dashboard = Dashboard::builder(config)
            .with_identity_stream(hub.clone())
            .with_profile_store(store.clone())
            .build()?;
        Ok(Self {
            dashboard,
            hub,
            store,
            failed: false,
        })
    }

    /// Runs the interactive loop until quit, EOF, or interrupt.
    ///
    /// Line editing runs on a dedicated OS thread; entered lines arrive
    /// over a channel and are handled here, one at a time.
    pub async fn run_interactive(&mut self) {
        println!("seeded profiles: uid-ravi (farmer), uid-meera (officer), uid-arjun (admin)");
        println!("Type 'help' for commands, 'quit' to leave.");

        let (mut readline_rx, ack_tx) = spawn_readline_thread();
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                event = readline_rx.recv() => {
                    match event {
                        Some(ReadlineEvent::Line(line)) => {
                            match self.handle_line(&line).await {
                                LoopControl::Continue => {
                                    // Release the next prompt.
                                    let _ = ack_tx.send(());
                                }
                                LoopControl::Exit => break,
                            }
                        }
                        Some(ReadlineEvent::Eof) | None => {
                            debug!("readline: EOF or channel closed");
                            break;
                        }
                    }
                }
                _ = &mut ctrl_c => {
                    debug!("interrupt received");
                    break;
                }
            }
        }
    }

    /// Runs a ';'-separated command script and returns the exit code:
    /// 0 if every command succeeded, 1 if any failed. A `quit` stops
    /// the script early.
    pub async fn run_script(&mut self, script: &str) -> i32 {
        for piece in script.split(';') {
            let line = piece.trim();
            if line.is_empty() {
                continue;
            }
            if self.handle_line(line).await == LoopControl::Exit {
                break;
            }
        }
        i32::from(self.failed)
    }

    /// Stops the session machine and the shell controller.
    pub async fn shutdown(self) {
        self.dashboard.shutdown().await;
    }

    /// Handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> LoopControl {
        match Command::parse(line) {
            Command::Empty => {}
            Command::Quit => {
                info!("quit requested");
                return LoopControl::Exit;
            }
            Command::Help => show_help(),
            Command::SignIn { principal } => self.sign_in(&principal).await,
            Command::SignOut => self.sign_out().await,
            Command::Go { path } => self.go(&path).await,
            Command::Resize { width } => self.resize(width).await,
            Command::Toggle => self.toggle().await,
            Command::Outage { engaged } => self.outage(engaged),
            Command::Retry => self.retry().await,
            Command::State => self.show_state(),
            Command::Routes => self.show_routes(),
            Command::Invalid { message } => self.fail(&message),
            Command::Unknown { input } => {
                self.fail(&format!("unknown command: {input} (try 'help')"));
            }
        }
        LoopControl::Continue
    }

    /// Announces a sign-in, waits for resolution, and opens the
    /// protected prefix — the driver-side equivalent of a sign-in page
    /// redirecting into the dashboard.
    async fn sign_in(&mut self, id: &str) {
        let principal = principal_for(id);
        println!("signing in {}", principal.id());
        self.hub.announce_signed_in(principal);

        let state = self.dashboard.settle().await;
        debug!(phase = %state.phase(), "session settled");

        let home = self.dashboard.config().surface.protected_prefix.clone();
        let frame = self.dashboard.navigate(home).await;
        println!("{frame}");
    }

    async fn sign_out(&mut self) {
        println!("signing out");
        self.hub.announce_signed_out();
        let _ = self.dashboard.settle().await;
        let frame = self.dashboard.refresh().await;
        println!("{frame}");
    }

    async fn go(&mut self, path: &str) {
        let frame = self.dashboard.navigate(path).await;
        println!("{frame}");
    }

    async fn resize(&mut self, width: u32) {
        let layout = self.dashboard.resize(width).await;
        println!("{}", layout_line(&layout));
    }

    async fn toggle(&mut self) {
        let layout = self.dashboard.toggle_sidebar().await;
        println!("{}", layout_line(&layout));
    }

    fn outage(&mut self, engaged: bool) {
        self.store.set_unavailable(engaged);
        println!(
            "profile store outage: {}",
            if engaged { "on" } else { "off" }
        );
    }

    async fn retry(&mut self) {
        let state = self.dashboard.retry().await;
        debug!(phase = %state.phase(), "retry settled");
        let frame = self.dashboard.refresh().await;
        println!("{frame}");
    }

    fn show_state(&self) {
        println!("{}", session_line(&self.dashboard.session().state()));
        println!("path     {}", self.dashboard.current_path());
        println!("{}", layout_line(&self.dashboard.shell_snapshot()));
        println!("store    {} profile(s)", self.store.len());
    }

    /// Lists the signed-in role's declared routes, or the public
    /// surface when nobody is resolved.
    fn show_routes(&self) {
        match self.dashboard.session().state().role() {
            Some(role) => {
                println!("routes for {role}:");
                for (path, page, capability) in
                    self.dashboard.catalog().declared_paths(role)
                {
                    println!("  {:<34} {page} [{capability}]", path.to_string());
                }
            }
            None => {
                let surface = &self.dashboard.config().surface;
                println!("public surface:");
                println!("  {:<12} landing", surface.landing.to_string());
                println!("  {:<12} sign-in", surface.sign_in.to_string());
                println!("  {:<12} register", surface.register.to_string());
                println!("sign in to list role routes");
            }
        }
    }

    fn fail(&mut self, message: &str) {
        self.failed = true;
        eprintln!("{message}");
    }
}

/// Shows help text as a single block (avoids per-line prompt redraws).
fn show_help() {
    println!(
        "Commands:\n\
         \x20 signin <id>       - Announce a signed-in principal and open the dashboard\n\
         \x20 signout           - Announce sign-out\n\
         \x20 go <path>         - Navigate to a path\n\
         \x20 resize <width-px> - Apply a new viewport width\n\
         \x20 toggle            - Open or close the sidebar\n\
         \x20 outage <on|off>   - Flip the profile store outage switch\n\
         \x20 retry             - Re-run a failed profile lookup\n\
         \x20 state             - Show session, path, and layout\n\
         \x20 routes            - List reachable routes\n\
         \x20 help              - Show this help\n\
         \x20 q / quit          - Leave"
    );
}

/// The session line in the same text form frames use.
fn session_line(state: &SessionState) -> String {
    match state {
        SessionState::Resolving => "session  resolving".to_string(),
        SessionState::Authenticated {
            principal, role, ..
        } => format!("session  {} ({role})", principal.label()),
        SessionState::Unauthenticated { reason } => {
            format!("session  signed out ({reason})")
        }
    }
}

/// The layout line in the same text form frames use.
fn layout_line(layout: &ShellSnapshot) -> String {
    let sidebar = if layout.sidebar_open {
        "sidebar open"
    } else {
        "sidebar closed"
    };
    if layout.scrim_visible() {
        format!("layout   {}, {sidebar}, scrim", layout.viewport)
    } else {
        format!("layout   {}, {sidebar}", layout.viewport)
    }
}

/// Demo identities the provider side knows display attributes for.
/// Any other id signs in as a bare principal (and, having no profile
/// record, exercises the profile-missing path).
fn known_principal(id: &str) -> Option<Principal> {
    match id {
        "uid-ravi" => Some(
            Principal::new(PrincipalId::new("uid-ravi"))
                .with_display_name("Ravi")
                .with_email("ravi@example.in"),
        ),
        "uid-meera" => Some(
            Principal::new(PrincipalId::new("uid-meera"))
                .with_display_name("Meera")
                .with_email("meera@example.in"),
        ),
        "uid-arjun" => Some(
            Principal::new(PrincipalId::new("uid-arjun"))
                .with_display_name("Arjun")
                .with_email("arjun@example.in"),
        ),
        _ => None,
    }
}

fn principal_for(id: &str) -> Principal {
    known_principal(id).unwrap_or_else(|| Principal::new(PrincipalId::new(id)))
}

/// One profile per role, keyed to the identities above.
fn seeded_store() -> MemoryProfileStore {
    let store = MemoryProfileStore::new();
    store.insert(
        PrincipalId::new("uid-ravi"),
        Profile::new(Role::Farmer).with_attribute("village", json!("Wagholi")),
    );
    store.insert(
        PrincipalId::new("uid-meera"),
        Profile::new(Role::Officer).with_attribute("district", json!("Nashik")),
    );
    store.insert(PrincipalId::new("uid-arjun"), Profile::new(Role::Admin));
    store
}

/// Spawns a dedicated OS thread running rustyline for line editing.
///
/// Returns the event receiver for the async loop plus the ack sender
/// that releases the next prompt. The thread exits when either channel
/// side is dropped.
fn spawn_readline_thread() -> (
    mpsc::UnboundedReceiver<ReadlineEvent>,
    std::sync::mpsc::Sender<()>,
) {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (ack_tx, ack_rx) = std::sync::mpsc::channel::<()>();

    if let Err(e) = std::thread::Builder::new()
        .name("bhoomi-readline".into())
        .spawn(move || {
            let config = rustyline::Config::builder().auto_add_history(true).build();

            let mut rl = match rustyline::DefaultEditor::with_config(config) {
                Ok(editor) => editor,
                Err(e) => {
                    error!("failed to create readline editor: {e}");
                    return;
                }
            };

            loop {
                match rl.readline("bhoomi> ") {
                    Ok(line) => {
                        if event_tx.send(ReadlineEvent::Line(line)).is_err() {
                            break; // Receiver dropped: shutdown
                        }
                        // Hold the next prompt until the line is handled.
                        if ack_rx.recv().is_err() {
                            break;
                        }
                    }
                    Err(rustyline::error::ReadlineError::Interrupted) => {
                        // Ctrl+C clears the current line, keeps the loop.
                        continue;
                    }
                    Err(rustyline::error::ReadlineError::Eof) => {
                        let _ = event_tx.send(ReadlineEvent::Eof);
                        break;
                    }
                    Err(e) => {
                        error!("readline error: {e}");
                        let _ = event_tx.send(ReadlineEvent::Eof);
                        break;
                    }
                }
            }
        })
    {
        error!("failed to spawn readline thread: {e}");
    }

    (event_rx, ack_tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bhoomi_app::ConfigLoader;
    use bhoomi_session::UnauthReason;
    use bhoomi_shell::ViewportClass;

    fn test_driver() -> DemoDriver {
        let config = ConfigLoader::new().skip_env_vars().load().unwrap();
        DemoDriver::assemble(config).unwrap()
    }

    #[test]
    fn seeded_store_covers_all_roles() {
        let store = seeded_store();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn known_principals_carry_display_names() {
        assert_eq!(principal_for("uid-ravi").label(), "Ravi");
        assert_eq!(principal_for("uid-meera").label(), "Meera");
        assert_eq!(principal_for("uid-someone").label(), "uid-someone");
    }

    #[tokio::test]
    async fn signin_known_principal_opens_role_home() {
        let mut driver = test_driver();
        let control = driver.handle_line("signin uid-ravi").await;
        assert_eq!(control, LoopControl::Continue);
        assert_eq!(
            driver.dashboard.session().state().role(),
            Some(Role::Farmer)
        );
        assert_eq!(driver.dashboard.current_path().as_str(), "/dashboard");
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn signin_unknown_principal_redirects_to_sign_in() {
        let mut driver = test_driver();
        driver.handle_line("signin uid-stranger").await;
        assert_eq!(
            driver.dashboard.session().state().unauth_reason(),
            Some(UnauthReason::ProfileMissing)
        );
        assert_eq!(driver.dashboard.current_path().as_str(), "/auth");
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn signout_redirects_off_the_protected_path() {
        let mut driver = test_driver();
        driver.handle_line("signin uid-meera").await;
        driver.handle_line("go /dashboard/alerts").await;
        driver.handle_line("signout").await;
        assert_eq!(
            driver.dashboard.session().state().unauth_reason(),
            Some(UnauthReason::SignedOut)
        );
        assert_eq!(driver.dashboard.current_path().as_str(), "/auth");
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn outage_then_retry_recovers() {
        let mut driver = test_driver();
        driver.handle_line("outage on").await;
        driver.handle_line("signin uid-arjun").await;
        assert_eq!(
            driver.dashboard.session().state().unauth_reason(),
            Some(UnauthReason::LookupFailed)
        );
        driver.handle_line("outage off").await;
        driver.handle_line("retry").await;
        assert_eq!(driver.dashboard.session().state().role(), Some(Role::Admin));
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn resize_and_toggle_drive_layout() {
        let mut driver = test_driver();
        driver.handle_line("signin uid-ravi").await;
        driver.handle_line("resize 500").await;
        let layout = driver.dashboard.shell_snapshot();
        assert_eq!(layout.viewport, ViewportClass::Mobile);
        assert!(!layout.sidebar_open);

        driver.handle_line("toggle").await;
        assert!(driver.dashboard.shell_snapshot().sidebar_open);
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn clean_script_exits_zero() {
        let mut driver = test_driver();
        let code = driver
            .run_script("signin uid-ravi; go /dashboard/weather; state; routes")
            .await;
        assert_eq!(code, 0);
        assert_eq!(
            driver.dashboard.current_path().as_str(),
            "/dashboard/weather"
        );
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn script_reports_failures_in_exit_code() {
        let mut driver = test_driver();
        assert_eq!(driver.run_script("state; bogus").await, 1);
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_usage_counts_as_failure() {
        let mut driver = test_driver();
        assert_eq!(driver.run_script("resize enormous").await, 1);
        driver.shutdown().await;
    }

    #[tokio::test]
    async fn script_stops_at_quit() {
        let mut driver = test_driver();
        assert_eq!(driver.run_script("quit; resize 100").await, 0);
        // The resize after quit never ran.
        assert_eq!(
            driver.dashboard.shell_snapshot().viewport,
            ViewportClass::Desktop
        );
        driver.shutdown().await;
    }
}
