//! Test execution: runs the UI and API suites.
//!
//! Every command receives its suite directory as an explicit working
//! directory; the process working directory is never changed.

use serde::Deserialize;

use crate::shell::CommandOutput;
use crate::tally::{Category, ValidationState};

use super::Auditor;

/// Aggregate counts from a Playwright JSON report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaywrightStats {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
}

#[derive(Deserialize)]
struct RawReport {
    stats: RawStats,
}

/// Accepts both `total/passed/failed` and Playwright's native
/// `expected/unexpected/flaky/skipped` counters.
#[derive(Deserialize)]
struct RawStats {
    total: Option<u64>,
    passed: Option<u64>,
    failed: Option<u64>,
    expected: Option<u64>,
    unexpected: Option<u64>,
    flaky: Option<u64>,
    skipped: Option<u64>,
}

/// Parse the `stats` object of a Playwright JSON report.
pub fn parse_playwright_stats(output: &str) -> anyhow::Result<PlaywrightStats> {
    let raw: RawReport = serde_json::from_str(output)?;
    let s = raw.stats;

    let passed = s
        .passed
        .or(s.expected)
        .ok_or_else(|| anyhow::anyhow!("report stats have no passed count"))?;
    let failed = s
        .failed
        .or(s.unexpected)
        .ok_or_else(|| anyhow::anyhow!("report stats have no failed count"))?;
    let total = match s.total {
        Some(total) => total,
        None => [failed, s.flaky.unwrap_or(0), s.skipped.unwrap_or(0)]
            .into_iter()
            .try_fold(passed, u64::checked_add)
            .ok_or_else(|| anyhow::anyhow!("report stats total overflows"))?,
    };

    Ok(PlaywrightStats {
        total,
        passed,
        failed,
    })
}

/// Run the test execution phase.
pub fn validate_tests(auditor: &Auditor, state: &mut ValidationState) {
    auditor.header("🧪 TEST EXECUTION VALIDATION");
    run_ui_suite(auditor, state);
    run_api_suite(auditor, state);
}

fn run_ui_suite(auditor: &Auditor, state: &mut ValidationState) {
    auditor.section("📱 UI Tests:");

    let ui = auditor.ui_dir();
    if !ui.is_dir() {
        state.record(false, "UI tests directory not found", Category::Tests);
        return;
    }
    let commands = &auditor.config().commands;

    auditor.progress("Installing UI dependencies...");
    let install = auditor.run_command(&commands.ui_install, &ui);
    state.record(
        install.is_success(),
        "UI dependencies installed successfully",
        Category::Tests,
    );

    auditor.progress("Running UI tests...");
    match auditor.run_command(&commands.ui_test, &ui) {
        CommandOutput::Success(out) => match parse_playwright_stats(&out) {
            Ok(stats) => {
                state.record(
                    stats.passed > 0,
                    format!("UI tests executed: {}/{} passed", stats.passed, stats.total),
                    Category::Tests,
                );
                state.record(
                    stats.failed == 0,
                    format!("No UI test failures: {} failed", stats.failed),
                    Category::Tests,
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot parse UI test results");
                state.record(false, "UI test results could not be parsed", Category::Tests);
            }
        },
        CommandOutput::Failed { .. } => {
            state.record(false, "UI tests failed to execute", Category::Tests);
        }
    }
}

fn run_api_suite(auditor: &Auditor, state: &mut ValidationState) {
    auditor.section("🔌 API Tests:");

    let api = auditor.api_dir();
    if !api.is_dir() {
        state.record(false, "API tests directory not found", Category::Tests);
        return;
    }

    auditor.progress("Running API tests...");
    let result = auditor.run_command(&auditor.config().commands.api_test, &api);
    if result.is_success() {
        state.record(true, "API tests executed successfully", Category::Tests);
    } else {
        state.record(false, "API tests failed to execute", Category::Tests);
    }
}
