//! View frames: what the host puts on screen after a path request.
//!
//! A [`ViewFrame`] is the dashboard's whole answer to one request:
//! where the request ended up, the session it was admitted under, and
//! the body to render. The body mirrors the gate's outcomes — a splash
//! while the session resolves, a bare public page, or a role page
//! wrapped in shell chrome. `Display` renders a deterministic text
//! form for the demo driver and its tests.

use std::fmt;
use std::sync::Arc;

use bhoomi_routes::{PageRef, RouteMatch, RoutePath};
use bhoomi_session::{SessionState, UnauthReason};
use bhoomi_shell::{Chrome, ShellSnapshot};
use bhoomi_types::Role;

/// What fills the content region.
#[derive(Debug, Clone)]
pub enum FrameBody {
    /// First resolution still in flight; hold the splash, keep the
    /// requested path for later.
    Loading,
    /// A public page outside the shell.
    Public {
        page: PageRef,
        /// Present when a redirect brought the user here.
        notice: Option<UnauthReason>,
    },
    /// A role page mounted inside the shell chrome.
    Shell {
        role: Role,
        matched: RouteMatch,
        chrome: Arc<Chrome>,
        layout: ShellSnapshot,
    },
}

/// One rendered answer to one requested path.
#[derive(Debug, Clone)]
pub struct ViewFrame {
    requested: RoutePath,
    resolved: RoutePath,
    session: SessionState,
    body: FrameBody,
}

impl ViewFrame {
    pub(crate) fn new(
        requested: RoutePath,
        resolved: RoutePath,
        session: SessionState,
        body: FrameBody,
    ) -> Self {
        Self {
            requested,
            resolved,
            session,
            body,
        }
    }

    /// The path as requested (normalized).
    #[must_use]
    pub fn requested(&self) -> &RoutePath {
        &self.requested
    }

    /// The path actually shown; differs from `requested` after a
    /// redirect.
    #[must_use]
    pub fn resolved(&self) -> &RoutePath {
        &self.resolved
    }

    /// The session snapshot this frame was admitted under.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn body(&self) -> &FrameBody {
        &self.body
    }

    /// Whether the request was redirected elsewhere.
    #[must_use]
    pub fn is_redirect(&self) -> bool {
        self.requested != self.resolved
    }

    /// The page on screen, if any page is.
    #[must_use]
    pub fn page(&self) -> Option<PageRef> {
        match &self.body {
            FrameBody::Loading => None,
            FrameBody::Public { page, .. } => Some(*page),
            FrameBody::Shell { matched, .. } => Some(matched.page),
        }
    }
}

impl fmt::Display for ViewFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_redirect() {
            writeln!(f, "route    {} -> {}", self.requested, self.resolved)?;
        } else {
            writeln!(f, "route    {}", self.resolved)?;
        }

        match &self.session {
            SessionState::Resolving => writeln!(f, "session  resolving")?,
            SessionState::Authenticated {
                principal, role, ..
            } => writeln!(f, "session  {} ({role})", principal.label())?,
            SessionState::Unauthenticated { reason } => {
                writeln!(f, "session  signed out ({reason})")?;
            }
        }

        match &self.body {
            FrameBody::Loading => write!(f, "view     loading splash")?,
            FrameBody::Public { page, notice } => {
                write!(f, "view     public page '{}'", page.name())?;
                if let Some(reason) = notice {
                    write!(f, "\nnotice   redirected: {reason}")?;
                    if reason.is_retryable() {
                        write!(f, " (retry available)")?;
                    }
                }
            }
            FrameBody::Shell {
                role,
                matched,
                chrome,
                layout,
            } => {
                writeln!(
                    f,
                    "view     {role} page '{}' [{}]",
                    matched.page.name(),
                    chrome.accent()
                )?;
                writeln!(f, "grant    {}", matched.capability)?;
                if !matched.params.is_empty() {
                    let params: Vec<String> = matched
                        .params
                        .iter()
                        .map(|(key, value)| format!("{key}={value}"))
                        .collect();
                    writeln!(f, "params   {}", params.join(" "))?;
                }
                let sidebar = if layout.sidebar_open {
                    "sidebar open"
                } else {
                    "sidebar closed"
                };
                if layout.scrim_visible() {
                    writeln!(f, "layout   {}, {sidebar}, scrim", layout.viewport)?;
                } else {
                    writeln!(f, "layout   {}, {sidebar}", layout.viewport)?;
                }
                let tabs: Vec<&str> = chrome
                    .bottom_tabs()
                    .iter()
                    .map(|item| item.label)
                    .collect();
                write!(f, "tabs     {}", tabs.join(" | "))?;
            }
        }
        Ok(())
    }
}
