//! Audit configuration.
//!
//! Every field defaults to the behavior of a plain `deliverycheck` run, so a
//! project without a config file gets the standard Playwright + Maven layout.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::walk::DEPENDENCY_CACHE_DIR;

/// Config file names searched for in the audited root.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["deliverycheck.yaml", ".deliverycheck.yaml"];

/// Errors found while validating a loaded configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("command {0:?} is empty")]
    EmptyCommand(&'static str),
    #[error("source_extensions must not be empty")]
    NoExtensions,
    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Top-level audit configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// UI test suite directory, relative to the root.
    pub ui_dir: String,
    /// API test suite directory, relative to the root.
    pub api_dir: String,
    /// Minimum accepted Node.js major version.
    pub min_node_major: u32,
    /// Extensions scanned by the quality detectors (without the dot).
    pub source_extensions: Vec<String>,
    /// Dependency-cache directory name never descended into.
    pub dependency_cache_dir: String,
    /// File names that must not be committed in either suite.
    pub sensitive_files: Vec<String>,
    /// Glob patterns (relative to the UI suite) excluded from the quality scan.
    pub excluded_paths: Vec<String>,
    /// Playwright HTML report directory, relative to the UI suite.
    pub ui_report_dir: String,
    /// Surefire report directory, relative to the API suite.
    pub api_report_dir: String,
    pub commands: Commands,
}

/// External commands, as argv lists.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Commands {
    pub node_version: Vec<String>,
    pub ui_install: Vec<String>,
    pub ui_test: Vec<String>,
    pub api_test: Vec<String>,
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            node_version: argv(&["node", "--version"]),
            ui_install: argv(&["npm", "ci"]),
            ui_test: argv(&["npx", "playwright", "test", "--reporter=json"]),
            api_test: argv(&["mvn", "test", "-Dtest=InventoryTestRunner"]),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            ui_dir: "ui-tests".to_string(),
            api_dir: "api-tests".to_string(),
            min_node_major: 18,
            source_extensions: argv(&["ts", "js"]),
            dependency_cache_dir: DEPENDENCY_CACHE_DIR.to_string(),
            sensitive_files: argv(&[".env", "credentials.json", "secrets.json"]),
            excluded_paths: Vec::new(),
            ui_report_dir: "playwright-report".to_string(),
            api_report_dir: "target/surefire-reports".to_string(),
            commands: Commands::default(),
        }
    }
}

impl AuditConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a configuration from YAML text. An empty document yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AuditConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Check that commands are runnable and globs compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let commands = [
            ("node_version", &self.commands.node_version),
            ("ui_install", &self.commands.ui_install),
            ("ui_test", &self.commands.ui_test),
            ("api_test", &self.commands.api_test),
        ];
        for (name, cmd) in commands {
            if cmd.first().map(|p| p.trim().is_empty()).unwrap_or(true) {
                return Err(ConfigError::EmptyCommand(name));
            }
        }

        if self.source_extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }

        for pattern in &self.excluded_paths {
            globset::Glob::new(pattern).map_err(|source| ConfigError::InvalidGlob {
                pattern: pattern.clone(),
                source,
            })?;
        }

        Ok(())
    }
}

/// Look for a config file in `root`.
pub fn discover(root: &Path) -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_standard_layout() {
        let cfg = AuditConfig::default();
        assert_eq!(cfg.ui_dir, "ui-tests");
        assert_eq!(cfg.api_dir, "api-tests");
        assert_eq!(cfg.min_node_major, 18);
        assert_eq!(cfg.source_extensions, vec!["ts", "js"]);
        assert_eq!(cfg.commands.api_test, vec!["mvn", "test", "-Dtest=InventoryTestRunner"]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
ui_dir: web-tests
min_node_major: 20
commands:
  ui_install: ["pnpm", "install", "--frozen-lockfile"]
"#;
        let cfg = AuditConfig::parse_str(yaml).unwrap();
        assert_eq!(cfg.ui_dir, "web-tests");
        assert_eq!(cfg.api_dir, "api-tests");
        assert_eq!(cfg.min_node_major, 20);
        assert_eq!(cfg.commands.ui_install[0], "pnpm");
        // Untouched commands keep their defaults
        assert_eq!(cfg.commands.node_version, vec!["node", "--version"]);
    }

    #[test]
    fn test_parse_empty_document() {
        let cfg = AuditConfig::parse_str("   \n").unwrap();
        assert_eq!(cfg.dependency_cache_dir, "node_modules");
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let mut cfg = AuditConfig::default();
        cfg.commands.api_test.clear();
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::EmptyCommand("api_test"))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_glob() {
        let cfg = AuditConfig {
            excluded_paths: vec!["fixtures/[".to_string()],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidGlob { .. })));
    }

    #[test]
    fn test_discover() {
        let temp = TempDir::new().unwrap();
        assert!(discover(temp.path()).is_none());

        std::fs::write(temp.path().join(".deliverycheck.yaml"), "ui_dir: ui\n").unwrap();
        let found = discover(temp.path()).unwrap();
        assert!(found.ends_with(".deliverycheck.yaml"));
        assert_eq!(AuditConfig::parse_file(found).unwrap().ui_dir, "ui");
    }
}
