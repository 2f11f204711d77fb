//! Output formatting for audit results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output, printed as the audit progresses
//! - JSON: one structured document printed after the audit

use colored::*;
use serde::{Deserialize, Serialize};

use crate::summary::{Summary, Verdict};
use crate::tally::{CheckRecord, ValidationState};

const RULE: &str = "================================";

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub root: String,
    pub passed: bool,
    pub verdict: Verdict,
    pub total_checks: usize,
    pub total_passed: usize,
    pub total_failed: usize,
    pub success_rate: f64,
    pub categories: Vec<JsonCategory>,
    pub checks: Vec<CheckRecord>,
}

/// One category's tally.
#[derive(Serialize, Deserialize)]
pub struct JsonCategory {
    pub category: String,
    pub passed: usize,
    pub failed: usize,
    pub issues: Vec<String>,
}

/// Build the JSON report for a finished audit.
pub fn build_json(root: &str, state: &ValidationState, summary: &Summary) -> JsonReport {
    let categories = state
        .tallies()
        .map(|(category, tally)| JsonCategory {
            category: category.as_str().to_string(),
            passed: tally.passed,
            failed: tally.failed,
            issues: tally.issues.clone(),
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        root: root.to_string(),
        passed: summary.passed(),
        verdict: summary.verdict,
        total_checks: summary.total_checks,
        total_passed: summary.total_passed,
        total_failed: summary.total_failed,
        success_rate: summary.rate,
        categories,
        checks: state.checks().to_vec(),
    }
}

/// Write results in JSON format.
pub fn write_json(root: &str, state: &ValidationState, summary: &Summary) -> anyhow::Result<()> {
    let report = build_json(root, state, summary);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Report banner printed before the first phase.
pub fn write_banner(root: &str) {
    println!("{}", "🔍 PROJECT VALIDATION REPORT".bold());
    println!("{}", RULE.blue());
    println!("{}", "Delivery Readiness Audit".cyan());
    print!("{}", "Root: ".dimmed());
    println!("{}", root);
    println!();
}

/// Heading for one audit phase.
pub fn write_phase_header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", RULE.blue());
}

/// Sub-heading inside a phase.
pub fn write_section(title: &str) {
    println!();
    println!("{}", title.cyan());
}

/// Progress note for a long-running step.
pub fn write_progress(message: &str) {
    println!("  {}", message.yellow());
}

/// One recorded check.
pub fn write_check(passed: bool, message: &str) {
    if passed {
        println!("  {}", format!("✓ {}", message).green());
    } else {
        println!("  {}", format!("✗ {}", message).red());
    }
}

/// Locations backing a failed check.
pub fn write_details(lines: &[String]) {
    for line in lines {
        println!("      {}", line.dimmed());
    }
}

/// Totals, verdict and the list of issues.
pub fn write_summary(state: &ValidationState, summary: &Summary) {
    write_phase_header("📋 VALIDATION SUMMARY");

    println!();
    println!("{}", "📊 OVERALL RESULTS:".bold());
    println!("{}", format!("   Total Checks: {}", summary.total_checks).blue());
    println!("{}", format!("   Passed: {}", summary.total_passed).green());
    println!("{}", format!("   Failed: {}", summary.total_failed).red());
    println!("{}", format!("   Success Rate: {:.1}%", summary.rate).yellow());

    println!();
    print!("🚦 FINAL STATUS: ");
    write_verdict(summary.verdict);
    println!();

    if summary.total_failed > 0 {
        write_issues(state);
    }
}

fn write_verdict(verdict: Verdict) {
    match verdict {
        Verdict::Ready => print!("{}", format!("✅ {}", verdict).green()),
        Verdict::MinorFixesNeeded => print!("{}", format!("⚠️ {}", verdict).yellow()),
        Verdict::MajorIssues => print!("{}", format!("❌ {}", verdict).red()),
    }
}

fn write_issues(state: &ValidationState) {
    println!();
    println!("{}", "⚠️ ISSUES TO ADDRESS:".yellow());

    for (category, tally) in state.tallies() {
        if tally.issues.is_empty() {
            continue;
        }
        println!();
        println!("{}", format!("{}:", category.as_str().to_uppercase()).cyan());
        for issue in &tally.issues {
            println!("  {}", format!("- {}", issue).red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;
    use crate::tally::Category;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_build_json() {
        let mut state = ValidationState::new();
        state.record(true, "Playwright config present", Category::Preflight);
        state.record(false, "No console.log statements found (2 found)", Category::Quality);
        let summary = summarize(&state);

        let report = build_json("/work/project", &state, &summary);
        assert_eq!(report.root, "/work/project");
        assert!(!report.passed);
        assert_eq!(report.verdict, Verdict::MinorFixesNeeded);
        assert_eq!(report.success_rate, 50.0);
        assert_eq!(report.categories.len(), 4);
        assert_eq!(report.categories[2].category, "quality");
        assert_eq!(
            report.categories[2].issues,
            vec!["No console.log statements found (2 found)"]
        );
        assert_eq!(report.checks.len(), 2);
    }

    #[test]
    fn test_json_field_names() {
        let state = ValidationState::new();
        let summary = summarize(&state);
        let value = serde_json::to_value(build_json(".", &state, &summary)).unwrap();

        assert_eq!(value["verdict"], "ready");
        assert_eq!(value["passed"], true);
        assert_eq!(value["success_rate"], 0.0);
        assert_eq!(value["categories"][0]["category"], "preflight");
    }
}
