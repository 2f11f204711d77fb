//! Core types for detector findings.

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// A line-level finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanFinding {
    pub path: String,
    /// 1-based line number
    pub line: usize,
}

impl std::fmt::Display for ScanFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// Kind of hardcoded credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    Password,
    ApiKey,
    Token,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Password => "password",
            CredentialKind::ApiKey => "api_key",
            CredentialKind::Token => "token",
        }
    }
}

impl std::fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file containing at least one hardcoded credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFinding {
    pub path: String,
    /// Every kind that matched, in detection order.
    pub kinds: Vec<CredentialKind>,
}

/// How a single file handles errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorHandling {
    /// Has both `try` and `catch`.
    Good,
    /// Does async work without `try`/`catch`.
    NeedsImprovement,
}

/// Error-handling classification counts, summed over a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorHandlingTally {
    pub good: usize,
    pub needs_improvement: usize,
}

impl ErrorHandlingTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one classified file.
    pub fn add(&mut self, class: ErrorHandling) {
        match class {
            ErrorHandling::Good => self.good += 1,
            ErrorHandling::NeedsImprovement => self.needs_improvement += 1,
        }
    }

    /// Merge a subtree's counts into this one.
    pub fn merge(&mut self, other: ErrorHandlingTally) {
        self.good += other.good;
        self.needs_improvement += other.needs_improvement;
    }
}

impl AddAssign for ErrorHandlingTally {
    fn add_assign(&mut self, other: Self) {
        self.merge(other);
    }
}

impl std::iter::Sum for ErrorHandlingTally {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |mut acc, t| {
            acc += t;
            acc
        })
    }
}

/// Combined findings of one quality scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFindings {
    pub console_statements: Vec<ScanFinding>,
    pub credentials: Vec<CredentialFinding>,
    pub error_handling: ErrorHandlingTally,
    /// Number of files read
    pub scanned: usize,
}

impl QualityFindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"path:line"` for each console statement, in scan order.
    pub fn console_locations(&self) -> Vec<String> {
        self.console_statements.iter().map(|f| f.to_string()).collect()
    }
}
