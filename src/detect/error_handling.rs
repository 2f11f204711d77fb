//! Error-handling coverage classification.
//!
//! # Caveats
//!
//! Classification is by substring over the whole file, not control flow.
//! `try`, `catch`, `await` and `Promise` are matched anywhere, including in
//! comments, strings and longer identifiers (`retry` contains `try`), so a
//! file can land in the wrong bucket.

use super::ErrorHandling;

const TRY_MARKER: &str = "try";
const CATCH_MARKER: &str = "catch";
const AWAIT_MARKER: &str = "await";
const PROMISE_MARKER: &str = "Promise";

/// Classify a file, or `None` when it has neither error handling nor async work.
pub fn classify_error_handling(content: &str) -> Option<ErrorHandling> {
    if content.contains(TRY_MARKER) && content.contains(CATCH_MARKER) {
        Some(ErrorHandling::Good)
    } else if content.contains(AWAIT_MARKER) || content.contains(PROMISE_MARKER) {
        Some(ErrorHandling::NeedsImprovement)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_catch_is_good() {
        let content =
            "async function f() {\n  try {\n    await page.goto(url);\n  } catch (e) {\n    throw e;\n  }\n}\n";
        assert_eq!(classify_error_handling(content), Some(ErrorHandling::Good));
    }

    #[test]
    fn test_bare_await_needs_improvement() {
        let content = "test('x', async ({ page }) => {\n  await page.click('#go');\n});\n";
        assert_eq!(
            classify_error_handling(content),
            Some(ErrorHandling::NeedsImprovement)
        );
    }

    #[test]
    fn test_promise_needs_improvement() {
        let content = "export function wait(): Promise<void> { return new Promise(r => r()); }";
        assert_eq!(
            classify_error_handling(content),
            Some(ErrorHandling::NeedsImprovement)
        );
    }

    #[test]
    fn test_plain_file_uncounted() {
        assert_eq!(classify_error_handling("export const BASE_URL = '/';\n"), None);
    }

    #[test]
    fn test_try_without_catch_falls_through() {
        let content = "try { await x(); } finally { done(); }";
        assert_eq!(
            classify_error_handling(content),
            Some(ErrorHandling::NeedsImprovement)
        );
    }
}
