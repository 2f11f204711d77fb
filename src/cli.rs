//! Command-line interface for deliverycheck.

use anyhow::Context;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{self, AuditConfig};
use crate::phases::Auditor;
use crate::report;
use crate::shell::SystemRunner;
use crate::summary;

/// Orchestration errors share the not-ready exit code.
pub const EXIT_ERROR: i32 = summary::EXIT_NOT_READY;

/// Delivery-readiness audit for a UI + API test automation project.
///
/// Runs pre-flight, test execution, code quality and report checks, then
/// prints a summary with a delivery verdict. Exits 0 only when every check
/// passed.
#[derive(Parser, Debug)]
#[command(name = "deliverycheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project root containing the UI and API suites
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,

    /// Path to config YAML file (default: auto-discover in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Install the stderr log subscriber.
pub fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Load the explicit config, a discovered one, or the defaults.
pub fn load_config(
    root: &std::path::Path,
    explicit: Option<&PathBuf>,
) -> anyhow::Result<AuditConfig> {
    let path = match explicit {
        Some(p) => Some(p.clone()),
        None => config::discover(root),
    };

    let cfg = match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "using config file");
            AuditConfig::parse_file(&p)
                .with_context(|| format!("parsing config {}", p.display()))?
        }
        None => AuditConfig::default(),
    };

    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

/// Run the audit and return the process exit code.
pub fn run_audit(cli: &Cli) -> anyhow::Result<i32> {
    let pretty = match cli.format.as_str() {
        "pretty" => true,
        "json" => false,
        other => anyhow::bail!("invalid format {:?}, must be 'pretty' or 'json'", other),
    };

    if !cli.root.is_dir() {
        anyhow::bail!("cannot access root {}", cli.root.display());
    }
    let cfg = load_config(&cli.root, cli.config.as_ref())?;
    let root_str = cli.root.to_string_lossy().to_string();

    if pretty {
        report::write_banner(&root_str);
    }

    let runner = SystemRunner::new().show_progress(pretty);
    let auditor = Auditor::new(&cli.root, cfg, runner).pretty(pretty);
    let state = auditor.run()?;
    let result = summary::summarize(&state);

    if pretty {
        report::write_summary(&state, &result);
    } else {
        report::write_json(&root_str, &state, &result)?;
    }

    tracing::info!(
        passed = result.total_passed,
        failed = result.total_failed,
        verdict = %result.verdict,
        "audit finished"
    );

    Ok(result.exit_code())
}
