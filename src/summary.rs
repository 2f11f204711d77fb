//! Summary and verdict calculation.
//!
//! Totals every category's tally, computes the success rate and classifies
//! the run into one of three delivery verdicts.

use serde::{Deserialize, Serialize};

use crate::tally::ValidationState;

/// Verdict thresholds on the total number of failed checks.
pub mod thresholds {
    /// At most this many failures is a minor-fixes verdict.
    pub const MINOR_MAX_FAILED: usize = 2;
}

/// Exit code when every check passed.
pub const EXIT_READY: i32 = 0;
/// Exit code when any check failed.
pub const EXIT_NOT_READY: i32 = 1;

/// Delivery-readiness verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ready,
    MinorFixesNeeded,
    MajorIssues,
}

impl Verdict {
    /// Classify a run by its failure count.
    pub fn from_failed(total_failed: usize) -> Self {
        match total_failed {
            0 => Verdict::Ready,
            n if n <= thresholds::MINOR_MAX_FAILED => Verdict::MinorFixesNeeded,
            _ => Verdict::MajorIssues,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Ready => "READY FOR DELIVERY",
            Verdict::MinorFixesNeeded => "MINOR FIXES NEEDED",
            Verdict::MajorIssues => "MAJOR ISSUES DETECTED",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Totals over all categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_passed: usize,
    pub total_failed: usize,
    pub total_checks: usize,
    /// Percentage of passed checks, rounded to one decimal; 0.0 when no check ran
    pub rate: f64,
    pub verdict: Verdict,
}

impl Summary {
    /// Whether every check passed.
    pub fn passed(&self) -> bool {
        self.total_failed == 0
    }

    /// Process exit code for this run.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            EXIT_READY
        } else {
            EXIT_NOT_READY
        }
    }
}

/// Success rate in percent, rounded to one decimal.
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = passed as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Summarize a finished audit.
pub fn summarize(state: &ValidationState) -> Summary {
    let (total_passed, total_failed) = state
        .tallies()
        .fold((0, 0), |(p, f), (_, t)| (p + t.passed, f + t.failed));
    let total_checks = total_passed + total_failed;

    Summary {
        total_passed,
        total_failed,
        total_checks,
        rate: success_rate(total_passed, total_checks),
        verdict: Verdict::from_failed(total_failed),
    }
}
