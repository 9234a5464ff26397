//! Orchestration for a full bootstrap run.
//!
//! Walks the stage sequence (verify → clean → setup → install → format →
//! test → build), issuing each stage's commands through a [`ProcessRunner`]
//! and consulting the configured [`FailurePolicy`] after every command.
//!
//! [`FailurePolicy`]: crate::core::types::FailurePolicy

use std::path::Path;

use anyhow::Result;
use tracing::{info, instrument, warn};

use crate::commands;
use crate::core::stage::Stage;
use crate::core::types::{
    BootstrapOutcome, CommandResult, CommandSpec, StepReport, StepStatus, should_halt,
};
use crate::io::cleaner::remove_dirs;
use crate::io::config::BootstrapConfig;
use crate::io::probe::ToolProbe;
use crate::io::process::ProcessRunner;

/// Run the bootstrap sequence for the project at `root`.
///
/// Returns `Err` only for faults outside external commands (e.g. a
/// directory that cannot be removed). Command failures are recorded in the
/// outcome and handled according to `cfg.on_failure`.
#[instrument(skip_all, fields(root = %root.display(), policy = ?cfg.on_failure))]
pub fn run_bootstrap<P: ToolProbe, R: ProcessRunner>(
    root: &Path,
    cfg: &BootstrapConfig,
    probe: &P,
    runner: &R,
) -> Result<BootstrapOutcome> {
    let mut run = Run {
        root,
        cfg,
        runner,
        steps: Vec::new(),
    };

    let mut stage = Stage::Verify;
    while !stage.is_terminal() {
        println!("==> {stage}");
        match stage {
            Stage::Verify => {
                if !probe.is_available(&cfg.manager) {
                    return Ok(run.self_install());
                }
                info!(manager = %cfg.manager, "package manager present");
            }
            Stage::Clean => {
                // `<manager> --rm` fails when no venv is recorded yet, so it
                // never halts the run and directory removal always happens.
                for spec in commands::for_stage(cfg, stage) {
                    run.exec(stage, &spec);
                }
                run.clean()?;
            }
            _ => {
                if run.run_all(stage, &commands::for_stage(cfg, stage)) {
                    return Ok(run.halted(stage));
                }
            }
        }
        stage = stage.next();
    }

    info!(failed = run.failed_count(), "bootstrap completed");
    Ok(BootstrapOutcome::Completed { steps: run.steps })
}

struct Run<'a, R> {
    root: &'a Path,
    cfg: &'a BootstrapConfig,
    runner: &'a R,
    steps: Vec<StepReport>,
}

impl<R: ProcessRunner> Run<'_, R> {
    /// Install the package manager with the base interpreter and stop.
    fn self_install(mut self) -> BootstrapOutcome {
        warn!(manager = %self.cfg.manager, "package manager not found, installing it");
        if self.run_all(Stage::Verify, &commands::self_install(self.cfg)) {
            return self.halted(Stage::Verify);
        }
        let path_hint = self.user_base_hint();
        BootstrapOutcome::SelfInstalled {
            path_hint,
            steps: self.steps,
        }
    }

    /// PATH hint derived from the interpreter's user base.
    ///
    /// Falls back to a hint that queries the user base from the shell when
    /// the query here fails.
    fn user_base_hint(&mut self) -> String {
        let (status, result) = self.exec(Stage::Verify, &commands::user_base_query(self.cfg));
        match result {
            Some(result) if status.is_ok() && !result.stdout.trim().is_empty() => {
                commands::path_hint(&result.stdout)
            }
            _ => {
                warn!("could not determine user base directory, PATH hint uses a shell lookup");
                commands::path_hint(&commands::user_base_shell_lookup(self.cfg))
            }
        }
    }

    /// Remove the venv and cache directories.
    fn clean(&mut self) -> Result<()> {
        let removed = remove_dirs(self.root, &self.cfg.dirs_to_clean())?;
        for path in removed {
            let display = path.strip_prefix(self.root).unwrap_or(&path).display();
            self.steps.push(StepReport {
                stage: Stage::Clean,
                action: format!("remove {display}"),
                status: StepStatus::Ok,
            });
        }
        Ok(())
    }

    /// Run `specs` in order. Returns true when the failure policy says stop.
    fn run_all(&mut self, stage: Stage, specs: &[CommandSpec]) -> bool {
        for spec in specs {
            let (status, _) = self.exec(stage, spec);
            if should_halt(self.cfg.on_failure, &status) {
                warn!(%stage, command = %spec, "halting after failed command");
                return true;
            }
        }
        false
    }

    /// Run one command and record its outcome.
    fn exec(&mut self, stage: Stage, spec: &CommandSpec) -> (StepStatus, Option<CommandResult>) {
        info!(%stage, command = %spec, "running");
        let (status, result) = match self.runner.run(spec, self.root) {
            Ok(result) => (StepStatus::from_result(&result), Some(result)),
            Err(err) => (
                StepStatus::SpawnError {
                    message: format!("{err:#}"),
                },
                None,
            ),
        };
        if !status.is_ok() {
            warn!(%stage, command = %spec, status = ?status, "command failed");
        }
        self.steps.push(StepReport {
            stage,
            action: spec.display_line(),
            status: status.clone(),
        });
        (status, result)
    }

    fn halted(self, stage: Stage) -> BootstrapOutcome {
        BootstrapOutcome::Halted {
            stage,
            steps: self.steps,
        }
    }

    fn failed_count(&self) -> usize {
        self.steps.iter().filter(|s| !s.status.is_ok()).count()
    }
}
