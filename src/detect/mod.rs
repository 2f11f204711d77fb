//! Line- and substring-based quality detectors.
//!
//! Each detector is a pure function over one file's content; [`Runner`]
//! composes them over a [`crate::walk::TreeWalker`].

mod console;
mod credentials;
mod error_handling;
mod runner;
mod types;

pub use console::{detect_console_statements, find_console_statements, CONSOLE_MARKER};
pub use credentials::{detect_credentials, find_credentials};
pub use error_handling::classify_error_handling;
pub use runner::Runner;
pub use types::{
    CredentialFinding, CredentialKind, ErrorHandling, ErrorHandlingTally, QualityFindings,
    ScanFinding,
};
