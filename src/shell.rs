//! Synchronous execution of external tools.
//!
//! Commands never panic and never return `Err`: a spawn failure or a
//! non-zero exit becomes [`CommandOutput::Failed`] so the caller can turn it
//! into a failed check and keep auditing.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Result of running an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// The command exited successfully; holds its stdout.
    Success(String),
    /// The command could not be spawned or exited non-zero.
    Failed { error: String, stderr: String },
}

impl CommandOutput {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutput::Success(_))
    }

    /// Stdout of a successful run.
    pub fn stdout(&self) -> Option<&str> {
        match self {
            CommandOutput::Success(out) => Some(out),
            CommandOutput::Failed { .. } => None,
        }
    }
}

/// Runs an argv-style command in a working directory.
pub trait CommandRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> CommandOutput;
}

/// Runs commands as child processes of this one.
#[derive(Debug, Default)]
pub struct SystemRunner {
    show_progress: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a spinner on stderr while a command is running.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn spinner(&self, label: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("    {spinner} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(label.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: &Path) -> CommandOutput {
        let label = argv.join(" ");
        let Some((program, args)) = argv.split_first() else {
            return CommandOutput::Failed {
                error: "empty command".to_string(),
                stderr: String::new(),
            };
        };

        tracing::debug!(command = %label, cwd = %cwd.display(), "running command");
        let spinner = self.spinner(&label);
        let output = Command::new(program).args(args).current_dir(cwd).output();
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        let result = match output {
            Ok(out) if out.status.success() => {
                CommandOutput::Success(String::from_utf8_lossy(&out.stdout).into_owned())
            }
            Ok(out) => CommandOutput::Failed {
                error: format!("command failed: {} ({})", label, out.status),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            },
            Err(e) => CommandOutput::Failed {
                error: format!("failed to run {}: {}", label, e),
                stderr: String::new(),
            },
        };

        match &result {
            CommandOutput::Success(_) => tracing::debug!(command = %label, "command succeeded"),
            CommandOutput::Failed { error, .. } => {
                tracing::debug!(command = %label, %error, "command failed")
            }
        }
        result
    }
}
