//! Report artifact checks.

use std::path::Path;

use crate::tally::{Category, ValidationState};

use super::Auditor;

fn is_non_empty_dir(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(e) => {
            tracing::debug!(path = %dir.display(), error = %e, "cannot list report directory");
            false
        }
    }
}

/// Run the reports phase.
pub fn validate_reports(auditor: &Auditor, state: &mut ValidationState) {
    auditor.header("📁 REPORTS & ARTIFACTS");

    let cfg = auditor.config();
    let ui_report = auditor.ui_dir().join(&cfg.ui_report_dir);
    let api_report = auditor.api_dir().join(&cfg.api_report_dir);

    state.record(
        ui_report.exists(),
        "Playwright report directory exists",
        Category::Reports,
    );
    state.record(
        api_report.exists(),
        "API test reports directory exists",
        Category::Reports,
    );

    if ui_report.exists() {
        state.record(
            is_non_empty_dir(&ui_report),
            "Test reports generated",
            Category::Reports,
        );
    }
}
