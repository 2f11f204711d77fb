//! Per-category check tallies.

use serde::{Deserialize, Serialize};

use crate::report;

/// The four audit phases a check can be recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Preflight,
    Tests,
    Quality,
    Reports,
}

impl Category {
    /// All categories, in audit order.
    pub const ALL: [Category; 4] = [
        Category::Preflight,
        Category::Tests,
        Category::Quality,
        Category::Reports,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Preflight => "preflight",
            Category::Tests => "tests",
            Category::Quality => "quality",
            Category::Reports => "reports",
        }
    }

    fn index(self) -> usize {
        match self {
            Category::Preflight => 0,
            Category::Tests => 1,
            Category::Quality => 2,
            Category::Reports => 3,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Running counters and failure messages for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub passed: usize,
    pub failed: usize,
    /// Failure messages in recording order.
    pub issues: Vec<String>,
}

impl CategoryTally {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }
}

/// One recorded check, kept for the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub category: Category,
    pub message: String,
    pub passed: bool,
}

/// Accumulator threaded through every phase.
#[derive(Debug, Clone, Default)]
pub struct ValidationState {
    tallies: [CategoryTally; 4],
    checks: Vec<CheckRecord>,
    echo: bool,
}

impl ValidationState {
    /// A state that records silently.
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a `✓`/`✗` line for each recorded check.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Record a single check outcome.
    pub fn record(&mut self, condition: bool, message: impl Into<String>, category: Category) {
        let message = message.into();
        if self.echo {
            report::write_check(condition, &message);
        }

        let tally = &mut self.tallies[category.index()];
        if condition {
            tally.passed += 1;
        } else {
            tally.failed += 1;
            tally.issues.push(message.clone());
        }

        self.checks.push(CheckRecord {
            category,
            message,
            passed: condition,
        });
    }

    pub fn tally(&self, category: Category) -> &CategoryTally {
        &self.tallies[category.index()]
    }

    /// Tallies paired with their category, in audit order.
    pub fn tallies(&self) -> impl Iterator<Item = (Category, &CategoryTally)> {
        Category::ALL.into_iter().map(move |c| (c, self.tally(c)))
    }

    /// Every recorded check, in recording order.
    pub fn checks(&self) -> &[CheckRecord] {
        &self.checks
    }
}
