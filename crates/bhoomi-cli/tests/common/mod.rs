//! Shared E2E test helpers for `bhoomi` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Configuration environment variables honored by the binary. Removed
/// so tests see the built-in defaults regardless of the shell they run
/// from.
const CONFIG_ENV_VARS: &[&str] = &[
    "BHOOMI_LANDING",
    "BHOOMI_SIGN_IN",
    "BHOOMI_REGISTER",
    "BHOOMI_PROTECTED_PREFIX",
    "BHOOMI_MOBILE_BREAKPOINT",
    "BHOOMI_INITIAL_WIDTH",
];

/// Build a Command for the `bhoomi` binary with a clean environment.
pub fn bhoomi_cmd() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("bhoomi");
    cmd.timeout(TIMEOUT_BASIC);
    cmd.env_remove("RUST_LOG");
    for var in CONFIG_ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}
