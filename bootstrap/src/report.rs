//! Run summary: console rendering and the optional JSON report file.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::stage::Stage;
use crate::core::types::{BootstrapOutcome, StepReport, StepStatus};

/// Serialized form of a finished run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub outcome: &'static str,
    pub halted_at: Option<Stage>,
    pub path_hint: Option<&'a str>,
    pub steps: &'a [StepReport],
}

impl<'a> RunReport<'a> {
    pub fn new(outcome: &'a BootstrapOutcome) -> Self {
        let (name, halted_at, path_hint) = match outcome {
            BootstrapOutcome::SelfInstalled { path_hint, .. } => {
                ("self_installed", None, Some(path_hint.as_str()))
            }
            BootstrapOutcome::Completed { .. } => ("completed", None, None),
            BootstrapOutcome::Halted { stage, .. } => ("halted", Some(*stage), None),
        };
        Self {
            outcome: name,
            halted_at,
            path_hint,
            steps: outcome.steps(),
        }
    }
}

/// Serialize the run report to pretty-printed JSON with trailing newline.
pub fn write_report(path: &Path, outcome: &BootstrapOutcome) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    let mut payload =
        serde_json::to_string_pretty(&RunReport::new(outcome)).context("serialize report")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Human-readable summary printed after the run.
pub fn render_summary(outcome: &BootstrapOutcome) -> String {
    let mut out = String::new();
    match outcome {
        BootstrapOutcome::SelfInstalled { path_hint, .. } => {
            let _ = writeln!(out, "{path_hint}");
            let _ = writeln!(
                out,
                "Package manager installed; re-run once it is on your PATH."
            );
            return out;
        }
        BootstrapOutcome::Completed { .. } => {
            let _ = writeln!(out, "Bootstrap completed.");
        }
        BootstrapOutcome::Halted { stage, .. } => {
            let _ = writeln!(out, "Bootstrap halted at {stage}.");
        }
    }
    for step in outcome.failed_steps() {
        let _ = writeln!(
            out,
            "  failed [{}] {}: {}",
            step.stage,
            step.action,
            describe(&step.status)
        );
    }
    out
}

fn describe(status: &StepStatus) -> String {
    match status {
        StepStatus::Ok => "ok".to_string(),
        StepStatus::Failed { timed_out: true, .. } => "timed out".to_string(),
        StepStatus::Failed { code: Some(code), .. } => format!("exit code {code}"),
        StepStatus::Failed { code: None, .. } => "terminated by signal".to_string(),
        StepStatus::SpawnError { message } => message.clone(),
    }
}
