//! Recursive source tree walking.
//!
//! [`TreeWalker`] is a `walkdir` traversal with two pluggable predicates: one
//! deciding which directories are never descended into and one deciding which
//! files are read. It yields [`SourceFile`]s lazily, sorted by file name so
//! the order is stable for a given tree.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Dependency-cache directory skipped by default.
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

/// Errors that stop a walk before it starts.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("scan root {0} does not exist")]
    RootNotFound(PathBuf),
    #[error("invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// A readable file matched by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

type DirPredicate = Box<dyn Fn(&str) -> bool>;
type FilePredicate = Box<dyn Fn(&Path) -> bool>;

/// Configurable directory walker.
pub struct TreeWalker {
    root: PathBuf,
    skip_dir: DirPredicate,
    visit_file: FilePredicate,
    excluded: Option<GlobSet>,
}

impl TreeWalker {
    /// Walk everything under `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            skip_dir: Box::new(|_| false),
            visit_file: Box::new(|_| true),
            excluded: None,
        }
    }

    /// Walker for source files: skips hidden directories and the dependency
    /// cache, and reads only files with one of `extensions`.
    pub fn sources<P: AsRef<Path>>(root: P, extensions: &[String], cache_dir: &str) -> Self {
        let extensions = extensions.to_vec();
        let cache_dir = cache_dir.to_string();
        Self::new(root)
            .skip_dir(move |name| name.starts_with('.') || name == cache_dir)
            .visit_file(move |path| has_extension(path, &extensions))
    }

    /// Directories whose name matches are not descended into.
    pub fn skip_dir<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.skip_dir = Box::new(predicate);
        self
    }

    /// Only files matching the predicate are read and yielded.
    pub fn visit_file<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Path) -> bool + 'static,
    {
        self.visit_file = Box::new(predicate);
        self
    }

    /// Exclude files whose path relative to the root matches any glob.
    pub fn exclude(mut self, patterns: &[String]) -> Result<Self, ScanError> {
        if patterns.is_empty() {
            return Ok(self);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|source| ScanError::InvalidPattern {
            pattern: patterns.join(", "),
            source,
        })?;
        self.excluded = Some(set);
        Ok(self)
    }

    /// Start the walk.
    ///
    /// A missing root is reported as [`ScanError::RootNotFound`] so callers
    /// can tell it apart from a tree with no matching files.
    pub fn walk(self) -> Result<SourceFiles, ScanError> {
        if !self.root.is_dir() {
            return Err(ScanError::RootNotFound(self.root));
        }

        let skip_dir = self.skip_dir;
        let entries = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |e| {
                // The root itself is never skipped, even when it is "."
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                !skip_dir(&*e.file_name().to_string_lossy())
            });

        Ok(SourceFiles {
            root: self.root,
            entries: Box::new(entries),
            visit_file: self.visit_file,
            excluded: self.excluded,
        })
    }
}

/// Lazy, single-pass sequence of matched files.
pub struct SourceFiles {
    root: PathBuf,
    entries: Box<dyn Iterator<Item = walkdir::Result<walkdir::DirEntry>>>,
    visit_file: FilePredicate,
    excluded: Option<GlobSet>,
}

impl SourceFiles {
    fn is_excluded(&self, path: &Path) -> bool {
        let Some(set) = &self.excluded else {
            return false;
        };
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        set.is_match(relative)
    }
}

impl Iterator for SourceFiles {
    type Item = SourceFile;

    fn next(&mut self) -> Option<SourceFile> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !(self.visit_file)(path) || self.is_excluded(path) {
                continue;
            }

            // Invalid UTF-8 is replaced, not skipped; only I/O errors drop a file
            match std::fs::read(path) {
                Ok(bytes) => {
                    return Some(SourceFile {
                        path: path.to_path_buf(),
                        content: String::from_utf8_lossy(&bytes).into_owned(),
                    })
                }
                Err(e) => {
                    // Best effort: one unreadable file never aborts the audit
                    tracing::debug!(path = %path.display(), error = %e, "skipping unreadable file");
                }
            }
        }
    }
}

/// Visit every readable source file under `root` with a matching extension.
///
/// Returns the number of files visited.
pub fn scan<P, F>(root: P, extensions: &[String], mut visit: F) -> Result<usize, ScanError>
where
    P: AsRef<Path>,
    F: FnMut(&Path, &str),
{
    let mut visited = 0;
    for file in TreeWalker::sources(root, extensions, DEPENDENCY_CACHE_DIR).walk()? {
        visit(&file.path, &file.content);
        visited += 1;
    }
    Ok(visited)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed == ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn relative_paths(root: &Path, files: impl Iterator<Item = SourceFile>) -> Vec<String> {
        files
            .map(|f| {
                f.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_skips_hidden_and_dependency_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "tests/login.spec.ts", "test");
        write(root, "pages/home.js", "page");
        write(root, ".cache/hidden.ts", "hidden");
        write(root, "node_modules/pkg/index.js", "dep");
        write(root, "pages/nested/node_modules/deep.ts", "dep");
        write(root, "README.md", "docs");

        let files = TreeWalker::sources(root, &exts(), "node_modules").walk().unwrap();
        let paths = relative_paths(root, files);

        assert_eq!(paths, vec!["pages/home.js", "tests/login.spec.ts"]);
    }

    #[test]
    fn test_hidden_files_are_still_visited() {
        // Only hidden directories are skipped, not hidden files
        let temp = TempDir::new().unwrap();
        write(temp.path(), ".eslintrc.js", "module.exports = {}");

        let files = TreeWalker::sources(temp.path(), &exts(), "node_modules").walk().unwrap();
        assert_eq!(files.count(), 1);
    }

    #[test]
    fn test_missing_root_is_distinguishable() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = TreeWalker::sources(&missing, &exts(), "node_modules")
            .walk()
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::RootNotFound(p) if p == missing));

        // An existing but empty tree is simply empty
        let files = TreeWalker::sources(temp.path(), &exts(), "node_modules").walk().unwrap();
        assert_eq!(files.count(), 0);
    }

    #[test]
    fn test_order_is_deterministic() {
        let temp = TempDir::new().unwrap();
        for name in ["c.ts", "a.ts", "b/z.ts", "b/a.js"] {
            write(temp.path(), name, "x");
        }
        let first = relative_paths(
            temp.path(),
            TreeWalker::sources(temp.path(), &exts(), "node_modules").walk().unwrap(),
        );
        let second = relative_paths(
            temp.path(),
            TreeWalker::sources(temp.path(), &exts(), "node_modules").walk().unwrap(),
        );
        assert_eq!(first, vec!["a.ts", "b/a.js", "b/z.ts", "c.ts"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_exclude_globs() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "tests/a.spec.ts", "x");
        write(temp.path(), "fixtures/data.ts", "x");

        let files = TreeWalker::sources(temp.path(), &exts(), "node_modules")
            .exclude(&["fixtures/**".to_string()])
            .unwrap()
            .walk()
            .unwrap();
        assert_eq!(relative_paths(temp.path(), files), vec!["tests/a.spec.ts"]);
    }

    #[test]
    fn test_custom_predicates() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "keep/a.txt", "x");
        write(temp.path(), "drop/b.txt", "x");

        let files = TreeWalker::new(temp.path())
            .skip_dir(|name| name == "drop")
            .visit_file(|p| p.extension().map(|e| e == "txt").unwrap_or(false))
            .walk()
            .unwrap();
        assert_eq!(relative_paths(temp.path(), files), vec!["keep/a.txt"]);
    }

    #[test]
    #[cfg(unix)]
    fn test_unreadable_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.ts", "ok");
        let locked = temp.path().join("locked.ts");
        std::fs::write(&locked, "console.log('hidden')").unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores permission bits, so only assert when the read really fails
        if std::fs::read(&locked).is_ok() {
            return;
        }

        let files = TreeWalker::sources(temp.path(), &exts(), "node_modules").walk().unwrap();
        assert_eq!(relative_paths(temp.path(), files), vec!["good.ts"]);
    }

    #[test]
    fn test_non_utf8_file_is_decoded_lossily() {
        let temp = TempDir::new().unwrap();
        // Latin-1 "café" on the first line
        std::fs::write(
            temp.path().join("legacy.spec.ts"),
            b"// caf\xe9\nconsole.log('debug');\n",
        )
        .unwrap();

        let files: Vec<SourceFile> = TreeWalker::sources(temp.path(), &exts(), "node_modules")
            .walk()
            .unwrap()
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "// caf\u{fffd}\nconsole.log('debug');\n");
    }

    #[test]
    fn test_scan_visits_each_file_once() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.ts", "one");
        write(temp.path(), "b.js", "two");
        write(temp.path(), "node_modules/c.js", "three");

        let mut seen = Vec::new();
        let visited = scan(temp.path(), &exts(), |_, content| seen.push(content.to_string()))
            .unwrap();
        assert_eq!(visited, 2);
        assert_eq!(seen, vec!["one", "two"]);
    }
}
