//! Audit phases and the orchestrator that runs them.
//!
//! Phases run in a fixed order and each records its checks into the shared
//! [`ValidationState`]. A failing check never stops later phases; only an
//! orchestration error (bad exclude pattern, for instance) aborts the run.

mod artifacts;
mod execution;
mod preflight;
mod quality;

use std::path::{Path, PathBuf};

use crate::config::AuditConfig;
use crate::report;
use crate::shell::{CommandOutput, CommandRunner};
use crate::tally::ValidationState;

pub use artifacts::validate_reports;
pub use execution::{parse_playwright_stats, validate_tests, PlaywrightStats};
pub use preflight::{parse_node_major, validate_preflight};
pub use quality::validate_quality;

/// Runs every audit phase against a project root.
pub struct Auditor {
    root: PathBuf,
    config: AuditConfig,
    runner: Box<dyn CommandRunner>,
    pretty: bool,
}

impl Auditor {
    /// Create an auditor for `root`.
    pub fn new<P, R>(root: P, config: AuditConfig, runner: R) -> Self
    where
        P: AsRef<Path>,
        R: CommandRunner + 'static,
    {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            runner: Box::new(runner),
            pretty: false,
        }
    }

    /// Print headings, progress and check lines while running.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Run all four phases in order.
    pub fn run(&self) -> anyhow::Result<ValidationState> {
        let mut state = ValidationState::new().echo(self.pretty);

        tracing::info!(root = %self.root.display(), "starting pre-flight checks");
        validate_preflight(self, &mut state);

        tracing::info!("starting test execution");
        validate_tests(self, &mut state);

        tracing::info!("starting code quality checks");
        validate_quality(self, &mut state)?;

        tracing::info!("starting report checks");
        validate_reports(self, &mut state);

        Ok(state)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub(crate) fn ui_dir(&self) -> PathBuf {
        self.root.join(&self.config.ui_dir)
    }

    pub(crate) fn api_dir(&self) -> PathBuf {
        self.root.join(&self.config.api_dir)
    }

    pub(crate) fn run_command(&self, argv: &[String], cwd: &Path) -> CommandOutput {
        let output = self.runner.run(argv, cwd);
        if let CommandOutput::Failed { error, stderr } = &output {
            tracing::warn!(%error, stderr = %stderr.trim(), "external command failed");
        }
        output
    }

    pub(crate) fn header(&self, title: &str) {
        if self.pretty {
            report::write_phase_header(title);
        }
    }

    pub(crate) fn section(&self, title: &str) {
        if self.pretty {
            report::write_section(title);
        }
    }

    pub(crate) fn progress(&self, message: &str) {
        if self.pretty {
            report::write_progress(message);
        }
    }

    pub(crate) fn detail(&self, lines: &[String]) {
        if self.pretty {
            report::write_details(lines);
        }
    }
}
