//! Pre-flight checks: toolchain, project layout and committed files.

use std::path::Path;

use serde_json::Value;

use crate::shell::CommandOutput;
use crate::tally::{Category, ValidationState};

use super::Auditor;

const UI_MANIFEST: &str = "package.json";
const API_MANIFEST: &str = "pom.xml";
const PLAYWRIGHT_CONFIG: &str = "playwright.config.ts";
const ENV_SAMPLE: &str = ".env.sample";

/// Major version from `node --version` output such as `v20.11.1`.
pub fn parse_node_major(output: &str) -> Option<u32> {
    let version = output.trim().trim_start_matches('v');
    version.split('.').next()?.trim().parse().ok()
}

/// Whether a `package.json` declares at least one runtime dependency.
fn has_dependencies(manifest: &Path) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(manifest)?;
    let json: Value = serde_json::from_str(&content)?;
    Ok(json
        .get("dependencies")
        .and_then(Value::as_object)
        .map(|deps| !deps.is_empty())
        .unwrap_or(false))
}

/// Run the pre-flight phase.
pub fn validate_preflight(auditor: &Auditor, state: &mut ValidationState) {
    auditor.header("🔍 PRE-FLIGHT CHECKS");

    let cfg = auditor.config();
    let ui = auditor.ui_dir();
    let api = auditor.api_dir();

    check_node_version(auditor, state);

    state.record(
        ui.is_dir() && api.is_dir(),
        format!("Project structure detected ({}, {})", cfg.ui_dir, cfg.api_dir),
        Category::Preflight,
    );

    match has_dependencies(&ui.join(UI_MANIFEST)) {
        Ok(configured) => {
            state.record(configured, "UI dependencies configured", Category::Preflight)
        }
        Err(e) => {
            tracing::debug!(error = %e, "cannot read UI manifest");
            state.record(false, "UI package.json invalid or missing", Category::Preflight);
        }
    }

    state.record(
        api.join(API_MANIFEST).is_file(),
        "API Maven configuration found",
        Category::Preflight,
    );

    state.record(
        ui.join(PLAYWRIGHT_CONFIG).is_file(),
        "Playwright config present",
        Category::Preflight,
    );
    state.record(
        ui.join(ENV_SAMPLE).is_file(),
        "Environment sample file present",
        Category::Preflight,
    );
    state.record(
        api.join(ENV_SAMPLE).is_file(),
        "API environment sample present",
        Category::Preflight,
    );

    let committed: Vec<String> = cfg
        .sensitive_files
        .iter()
        .flat_map(|name| [(&cfg.ui_dir, &ui, name), (&cfg.api_dir, &api, name)])
        .filter(|(_, dir, name)| dir.join(name).exists())
        .map(|(label, _, name)| format!("{}/{}", label, name))
        .collect();
    state.record(
        committed.is_empty(),
        "No sensitive data files committed",
        Category::Preflight,
    );
    if !committed.is_empty() {
        auditor.detail(&committed);
    }
}

fn check_node_version(auditor: &Auditor, state: &mut ValidationState) {
    let cfg = auditor.config();
    let output = auditor.run_command(&cfg.commands.node_version, auditor.root());

    let detected = match &output {
        CommandOutput::Success(out) => parse_node_major(out).map(|major| (out.trim(), major)),
        CommandOutput::Failed { .. } => None,
    };

    match detected {
        Some((raw, major)) => state.record(
            major >= cfg.min_node_major,
            format!(
                "Node.js v{} detected (>={} required)",
                raw.trim_start_matches('v'),
                cfg.min_node_major
            ),
            Category::Preflight,
        ),
        None => state.record(false, "Node.js not found or incompatible", Category::Preflight),
    }
}
