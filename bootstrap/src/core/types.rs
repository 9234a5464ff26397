//! Shared deterministic types for the bootstrap core.
//!
//! These types carry no I/O. Runners, the orchestrator, and the run report
//! all speak in terms of them.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// A single external command invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Extra entries merged into the child's environment only.
    pub envs: BTreeMap<String, String>,
    /// Pipe and return stdout instead of inheriting it.
    pub capture: bool,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            envs: BTreeMap::new(),
            capture: false,
        }
    }

    pub fn with_envs(mut self, envs: &BTreeMap<String, String>) -> Self {
        self.envs.extend(envs.clone());
        self
    }

    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Program and arguments joined by spaces, for logs and reports.
    pub fn display_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_line())
    }
}

/// Structured result of a finished external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Exit code, `None` when the child was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    /// Captured stdout (empty unless the command asked for capture).
    pub stdout: String,
    pub timed_out: bool,
}

impl CommandResult {
    pub fn succeeded() -> Self {
        Self {
            code: Some(0),
            success: true,
            ..Self::default()
        }
    }

    pub fn failed(code: i32) -> Self {
        Self {
            code: Some(code),
            success: false,
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }
}

/// What to do after an external command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and move on to the next step.
    #[default]
    Continue,
    /// Stop the run at the first failed command.
    Halt,
}

/// Outcome of one recorded step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Ok,
    Failed {
        code: Option<i32>,
        timed_out: bool,
    },
    SpawnError {
        message: String,
    },
}

impl StepStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, StepStatus::Ok)
    }

    pub fn from_result(result: &CommandResult) -> Self {
        if result.success {
            StepStatus::Ok
        } else {
            StepStatus::Failed {
                code: result.code,
                timed_out: result.timed_out,
            }
        }
    }
}

/// One line of the run log: a command or a directory removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub stage: Stage,
    pub action: String,
    #[serde(flatten)]
    pub status: StepStatus,
}

/// How a bootstrap run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The package manager was missing and has been installed. The user must
    /// update their PATH before re-running.
    SelfInstalled {
        path_hint: String,
        steps: Vec<StepReport>,
    },
    /// Every stage ran. Some steps may still have failed under `Continue`.
    Completed { steps: Vec<StepReport> },
    /// A step failed under `Halt`.
    Halted { stage: Stage, steps: Vec<StepReport> },
}

impl BootstrapOutcome {
    pub fn steps(&self) -> &[StepReport] {
        match self {
            BootstrapOutcome::SelfInstalled { steps, .. }
            | BootstrapOutcome::Completed { steps }
            | BootstrapOutcome::Halted { steps, .. } => steps,
        }
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepReport> {
        self.steps().iter().filter(|step| !step.status.is_ok())
    }
}

/// Decide whether the run stops after a step with `status`.
pub fn should_halt(policy: FailurePolicy, status: &StepStatus) -> bool {
    policy == FailurePolicy::Halt && !status.is_ok()
}
