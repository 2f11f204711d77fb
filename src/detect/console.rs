//! Detection of leftover console output statements.
//!
//! # Caveats
//!
//! Matching is line-based and textual. A `console.log` inside a string
//! literal or a block comment is still reported; only lines whose trimmed
//! text starts with `//` are treated as commented out.

use super::ScanFinding;

/// Marker of a console output call.
pub const CONSOLE_MARKER: &str = "console.log";

const LINE_COMMENT: &str = "//";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// 1-based line numbers of console statements in `content`.
pub fn find_console_statements(content: &str) -> Vec<usize> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| line.contains(CONSOLE_MARKER) && !is_line_comment(line))
        .map(|(idx, _)| idx + 1)
        .collect()
}

fn is_line_comment(line: &str) -> bool {
    line.trim_start_matches(BYTE_ORDER_MARK)
        .trim()
        .starts_with(LINE_COMMENT)
}

/// Console statements in one file, as findings.
pub fn detect_console_statements(path: &str, content: &str) -> Vec<ScanFinding> {
    find_console_statements(content)
        .into_iter()
        .map(|line| ScanFinding {
            path: path.to_string(),
            line,
        })
        .collect()
}
