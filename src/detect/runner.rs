//! Quality scan runner that applies every detector to each walked file.

use std::path::{Path, PathBuf};

use crate::walk::{ScanError, SourceFile, TreeWalker};

use super::{
    classify_error_handling, detect_console_statements, detect_credentials, QualityFindings,
};

/// Applies the console, credential and error-handling detectors to a tree.
pub struct Runner {
    /// Finding paths are reported relative to this directory.
    base_dir: PathBuf,
}

impl Runner {
    /// Create a runner reporting paths relative to `base_dir`.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Walk the tree once and run every detector on each file.
    pub fn run(&self, walker: TreeWalker) -> Result<QualityFindings, ScanError> {
        Ok(self.run_files(walker.walk()?))
    }

    /// Run every detector over an already-walked sequence of files.
    pub fn run_files<I>(&self, files: I) -> QualityFindings
    where
        I: IntoIterator<Item = SourceFile>,
    {
        let mut findings = QualityFindings::new();

        for file in files {
            let display = self.display_path(&file.path);

            findings
                .console_statements
                .extend(detect_console_statements(&display, &file.content));

            if let Some(cred) = detect_credentials(&display, &file.content) {
                findings.credentials.push(cred);
            }

            if let Some(class) = classify_error_handling(&file.content) {
                findings.error_handling.add(class);
            }

            findings.scanned += 1;
        }

        findings
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::{CredentialKind, ErrorHandlingTally};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn exts() -> Vec<String> {
        vec!["ts".to_string(), "js".to_string()]
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_runner_combines_detectors() {
        let temp = TempDir::new().unwrap();
        let ui = temp.path().join("ui-tests");
        write(
            &ui,
            "tests/login.spec.ts",
            "test('login', async ({ page }) => {\n  const password = \"abc123\";\n  console.log(password);\n  await page.fill('#pw', password);\n});\n",
        );
        write(
            &ui,
            "pages/base.ts",
            "export async function open(page) {\n  try {\n    await page.goto('/');\n  } catch (e) {\n    throw e;\n  }\n}\n",
        );
        write(&ui, "utils/const.js", "module.exports = { retries: 2 };\n");
        write(&ui, "node_modules/lib/index.js", "console.log('vendored')\n");
        write(&ui, ".auth/state.ts", "const token = 'abc'\n");

        let runner = Runner::new(temp.path());
        let findings = runner
            .run(TreeWalker::sources(&ui, &exts(), "node_modules"))
            .unwrap();

        assert_eq!(findings.scanned, 3);
        assert_eq!(findings.console_locations(), vec!["ui-tests/tests/login.spec.ts:3"]);
        assert_eq!(findings.credentials.len(), 1);
        assert_eq!(findings.credentials[0].path, "ui-tests/tests/login.spec.ts");
        assert_eq!(findings.credentials[0].kinds, vec![CredentialKind::Password]);
        assert_eq!(
            findings.error_handling,
            ErrorHandlingTally { good: 1, needs_improvement: 1 }
        );
    }

    #[test]
    fn test_runner_scans_non_utf8_files() {
        let temp = TempDir::new().unwrap();
        let ui = temp.path().join("ui-tests");
        std::fs::create_dir_all(&ui).unwrap();
        std::fs::write(
            ui.join("legacy.spec.ts"),
            b"// caf\xe9\nconsole.log('debug');\nconst password = \"abc123\";\n",
        )
        .unwrap();

        let findings = Runner::new(temp.path())
            .run(TreeWalker::sources(&ui, &exts(), "node_modules"))
            .unwrap();

        assert_eq!(findings.scanned, 1);
        assert_eq!(findings.console_locations(), vec!["ui-tests/legacy.spec.ts:2"]);
        assert_eq!(findings.credentials.len(), 1);
    }

    #[test]
    fn test_runner_missing_root() {
        let temp = TempDir::new().unwrap();
        let runner = Runner::new(temp.path());
        let err = runner
            .run(TreeWalker::sources(temp.path().join("ui-tests"), &exts(), "node_modules"))
            .unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }
}
