//! Code quality checks over the UI suite sources.

use crate::detect::{QualityFindings, Runner};
use crate::tally::{Category, ValidationState};
use crate::walk::{ScanError, TreeWalker};

use super::Auditor;

/// Run the code quality phase.
///
/// A missing UI suite scans as empty. The missing directory has already been
/// reported by the pre-flight and test phases.
pub fn validate_quality(auditor: &Auditor, state: &mut ValidationState) -> anyhow::Result<()> {
    auditor.header("📊 CODE QUALITY CHECKS");

    let cfg = auditor.config();
    let walker = TreeWalker::sources(
        auditor.ui_dir(),
        &cfg.source_extensions,
        &cfg.dependency_cache_dir,
    )
    .exclude(&cfg.excluded_paths)?;

    let findings = match Runner::new(auditor.root()).run(walker) {
        Ok(findings) => findings,
        Err(ScanError::RootNotFound(path)) => {
            tracing::warn!(path = %path.display(), "quality scan root not found");
            QualityFindings::new()
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(files = findings.scanned, "quality scan finished");

    let consoles = findings.console_locations();
    state.record(
        consoles.is_empty(),
        format!("No console.log statements found ({} found)", consoles.len()),
        Category::Quality,
    );
    auditor.detail(&consoles);

    state.record(
        findings.credentials.is_empty(),
        format!(
            "No hardcoded credentials found ({} found)",
            findings.credentials.len()
        ),
        Category::Quality,
    );
    let creds: Vec<String> = findings
        .credentials
        .iter()
        .map(|c| {
            let kinds: Vec<&str> = c.kinds.iter().map(|k| k.as_str()).collect();
            format!("{} ({})", c.path, kinds.join(", "))
        })
        .collect();
    auditor.detail(&creds);

    let handling = findings.error_handling;
    tracing::debug!(
        good = handling.good,
        needs_improvement = handling.needs_improvement,
        "error handling tally"
    );
    state.record(
        handling.needs_improvement == 0,
        "Proper error handling implemented",
        Category::Quality,
    );
    if handling.needs_improvement > 0 {
        auditor.detail(&[format!(
            "{} file(s) with async code and no try/catch, {} with try/catch",
            handling.needs_improvement, handling.good
        )]);
    }

    Ok(())
}
