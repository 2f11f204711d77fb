//! Deliverycheck - delivery-readiness auditor.
//!
//! Deliverycheck audits a project made of a Playwright UI test suite and a
//! Maven API test suite. It runs four phases of checks, tallies passes and
//! failures per phase and turns the totals into a delivery verdict.
//!
//! # Architecture
//!
//! - `shell`: synchronous external command execution
//! - `tally`: per-category check recorder
//! - `walk`: configurable source tree walker
//! - `detect`: console, credential and error-handling detectors
//! - `phases`: pre-flight, test execution, quality and report phases
//! - `summary`: totals, success rate and verdict
//! - `report`: output formatting (pretty, JSON)
//! - `config`: YAML audit configuration

pub mod cli;
pub mod config;
pub mod detect;
pub mod phases;
pub mod report;
pub mod shell;
pub mod summary;
pub mod tally;
pub mod walk;

pub use config::AuditConfig;
pub use detect::{ErrorHandlingTally, QualityFindings, ScanFinding};
pub use phases::Auditor;
pub use shell::{CommandOutput, CommandRunner, SystemRunner};
pub use summary::{summarize, Summary, Verdict};
pub use tally::{Category, CategoryTally, ValidationState};
pub use walk::{scan, ScanError, SourceFile, TreeWalker};
