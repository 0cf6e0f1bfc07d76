//! Line parsing for the demo driver.
//!
//! One entered line becomes one [`Command`]. Parsing never fails hard:
//! a malformed invocation becomes [`Command::Invalid`] with a usage
//! message, and anything unrecognized becomes [`Command::Unknown`], so
//! the loop decides what to do with bad input instead of the parser.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; ignored.
    Empty,
    /// Leave the driver.
    Quit,
    /// Show the command list.
    Help,
    /// Announce a signed-in principal and open the dashboard.
    SignIn { principal: String },
    /// Announce sign-out.
    SignOut,
    /// Navigate to a path.
    Go { path: String },
    /// Apply a new viewport width.
    Resize { width: u32 },
    /// Toggle the sidebar.
    Toggle,
    /// Flip the profile store outage switch.
    Outage { engaged: bool },
    /// Re-run a failed profile lookup.
    Retry,
    /// Show session, path, and layout.
    State,
    /// List reachable routes.
    Routes,
    /// Recognized verb, unusable arguments.
    Invalid { message: String },
    /// Not a known verb.
    Unknown { input: String },
}

impl Command {
    /// Parses one input line.
    ///
    /// Extra arguments after a zero-argument verb are ignored.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let mut words = trimmed.split_whitespace();
        let head = words.next().unwrap_or_default();
        let rest: Vec<&str> = words.collect();

        match head {
            "q" | "quit" => Command::Quit,
            "help" | "?" => Command::Help,
            "signin" => match rest.as_slice() {
                [id] => Command::SignIn {
                    principal: (*id).to_string(),
                },
                _ => Command::invalid("usage: signin <principal-id>"),
            },
            "signout" => Command::SignOut,
            "go" => match rest.as_slice() {
                [path] => Command::Go {
                    path: (*path).to_string(),
                },
                _ => Command::invalid("usage: go <path>"),
            },
            "resize" => match rest.as_slice() {
                [width] => match width.parse() {
                    Ok(width) => Command::Resize { width },
                    Err(_) => Command::invalid(format!(
                        "resize: expected a width in px, got '{width}'"
                    )),
                },
                _ => Command::invalid("usage: resize <width-px>"),
            },
            "toggle" => Command::Toggle,
            "outage" => match rest.as_slice() {
                ["on"] => Command::Outage { engaged: true },
                ["off"] => Command::Outage { engaged: false },
                _ => Command::invalid("usage: outage <on|off>"),
            },
            "retry" => Command::Retry,
            "state" => Command::State,
            "routes" => Command::Routes,
            _ => Command::Unknown {
                input: trimmed.to_string(),
            },
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Command::Invalid {
            message: message.into(),
        }
    }
}
