//! Bhoomi dashboard demo driver.
//!
//! Assembles the dashboard over seeded in-memory backends and drives it
//! from the terminal: interactively (rustyline prompt) or in script
//! mode, where trailing arguments form a ';'-separated command list and
//! the exit code reports whether every command succeeded.
//!
//! ```text
//! bhoomi                                  # interactive
//! bhoomi signin uid-ravi; go /dashboard/mandi; state
//! bhoomi -c bhoomi.toml --width 360
//! ```
//!
//! Configuration follows the library's loader: defaults, then an
//! optional TOML file, then `BHOOMI_*` environment variables
//! (`BHOOMI_LANDING`, `BHOOMI_SIGN_IN`, `BHOOMI_REGISTER`,
//! `BHOOMI_PROTECTED_PREFIX`, `BHOOMI_MOBILE_BREAKPOINT`,
//! `BHOOMI_INITIAL_WIDTH`), then the `--width`/`--breakpoint` flags on
//! top.

mod command;
mod driver;

use std::path::PathBuf;

use anyhow::Context;
use bhoomi_app::{ConfigError, ConfigLoader, DashboardConfig};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::driver::DemoDriver;

#[derive(Parser, Debug)]
#[command(name = "bhoomi", version, about = "Bhoomi dashboard demo driver", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial viewport width in px (overrides config)
    #[arg(long)]
    width: Option<u32>,

    /// Mobile breakpoint in px (overrides config)
    #[arg(long)]
    breakpoint: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose (info) logging
    #[arg(short, long)]
    verbose: bool,

    /// Commands to run non-interactively, ';'-separated
    #[arg(trailing_var_arg = true)]
    script: Vec<String>,
}

impl Args {
    fn script_string(&self) -> Option<String> {
        if self.script.is_empty() {
            None
        } else {
            Some(self.script.join(" "))
        }
    }
}

/// `--debug` wins over `--verbose`, which wins over `RUST_LOG`; the
/// quiet default only reports warnings.
fn log_filter(args: &Args) -> EnvFilter {
    if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Loads configuration through the library loader, then lets the
/// width/breakpoint flags override whatever file and environment said.
fn resolve_config(args: &Args) -> Result<DashboardConfig, ConfigError> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_file(path);
    }
    let mut config = loader.load()?;

    if let Some(width) = args.width {
        config.shell.initial_width = width;
    }
    if let Some(breakpoint) = args.breakpoint {
        config.shell.mobile_breakpoint = breakpoint;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(log_filter(&args)))
        .init();

    println!("Bhoomi dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = resolve_config(&args).context("failed to load configuration")?;
    let mut driver = DemoDriver::assemble(config).context("failed to assemble dashboard")?;

    if let Some(script) = args.script_string() {
        let code = driver.run_script(&script).await;
        driver.shutdown().await;
        std::process::exit(code);
    }

    driver.run_interactive().await;
    driver.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(argv)
    }

    #[test]
    fn debug_flag_outranks_verbose() {
        let filter = log_filter(&args(&["bhoomi", "--debug", "--verbose"]));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn verbose_flag_selects_info() {
        let filter = log_filter(&args(&["bhoomi", "--verbose"]));
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn trailing_args_join_into_a_script() {
        let parsed = args(&["bhoomi", "signin", "uid-ravi;", "state"]);
        assert_eq!(parsed.script_string().as_deref(), Some("signin uid-ravi; state"));
    }

    #[test]
    fn no_trailing_args_means_interactive() {
        assert_eq!(args(&["bhoomi", "--verbose"]).script_string(), None);
    }

    #[test]
    fn cli_flags_override_config_file() {
        std::env::remove_var("BHOOMI_INITIAL_WIDTH");
        std::env::remove_var("BHOOMI_MOBILE_BREAKPOINT");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[shell]\ninitial_width = 1440\nmobile_breakpoint = 700"
        )
        .unwrap();

        let parsed = args(&[
            "bhoomi",
            "-c",
            file.path().to_str().unwrap(),
            "--width",
            "360",
        ]);
        let config = resolve_config(&parsed).unwrap();
        assert_eq!(config.shell.initial_width, 360);
        assert_eq!(config.shell.mobile_breakpoint, 700);
    }
}
