//! Viewport classification.
//!
//! The shell cares about exactly one thing from the window geometry:
//! mobile or desktop, split at a configurable width. Everything else
//! (sidebar defaults, scrim, bottom tabs) derives from the class, not
//! the raw width.

use serde::{Deserialize, Serialize};

/// Width below which the shell behaves as mobile.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;

/// Width the embedding app seeds its width source with.
pub const DEFAULT_INITIAL_WIDTH: u32 = 1280;

/// Shell tuning knobs. Embedded as the `[shell]` section of the
/// dashboard config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Widths strictly below this are mobile.
    pub mobile_breakpoint: u32,
    /// Starting width. The controller itself only reads the width
    /// source; this seeds it.
    pub initial_width: u32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            initial_width: DEFAULT_INITIAL_WIDTH,
        }
    }
}

/// The two layout classes the shell distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    /// Sidebar overlays content and opens behind a scrim.
    Mobile,
    /// Sidebar is persistently docked; no scrim.
    Desktop,
}

impl ViewportClass {
    /// Classifies a width against a breakpoint.
    #[must_use]
    pub fn classify(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    #[must_use]
    pub fn is_mobile(self) -> bool {
        matches!(self, ViewportClass::Mobile)
    }

    /// The sidebar default when this class is (re-)entered.
    #[must_use]
    pub fn default_sidebar_open(self) -> bool {
        !self.is_mobile()
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewportClass::Mobile => write!(f, "mobile"),
            ViewportClass::Desktop => write!(f, "desktop"),
        }
    }
}
