//! Test-only fakes for the probe and process boundaries.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::core::types::{CommandResult, CommandSpec};
use crate::io::probe::ToolProbe;
use crate::io::process::ProcessRunner;

/// Probe that reports a fixed set of tools as installed.
#[derive(Debug, Default)]
pub struct StubProbe {
    available: HashSet<String>,
}

impl StubProbe {
    pub fn with(tools: &[&str]) -> Self {
        Self {
            available: tools.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ToolProbe for StubProbe {
    fn is_available(&self, name: &str) -> bool {
        self.available.contains(name)
    }
}

/// Runner that records every call and answers from a script.
///
/// Commands succeed unless scripted otherwise. Scripts are keyed by the
/// command's display line (`program arg1 arg2`).
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<CommandSpec>>,
    failures: HashMap<String, i32>,
    stdout: HashMap<String, String>,
    unspawnable: HashSet<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `line` exit with `code`.
    pub fn failing(mut self, line: &str, code: i32) -> Self {
        self.failures.insert(line.to_string(), code);
        self
    }

    /// Make `line` print `stdout` (returned only when the command captures).
    pub fn printing(mut self, line: &str, stdout: &str) -> Self {
        self.stdout.insert(line.to_string(), stdout.to_string());
        self
    }

    /// Make every command for `program` fail to spawn.
    pub fn unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.insert(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    pub fn call_lines(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(CommandSpec::display_line)
            .collect()
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec, _workdir: &Path) -> Result<CommandResult> {
        self.calls.borrow_mut().push(spec.clone());
        if self.unspawnable.contains(&spec.program) {
            return Err(anyhow!("spawn {}: not found", spec.program));
        }
        let line = spec.display_line();
        let result = match self.failures.get(&line) {
            Some(code) => CommandResult::failed(*code),
            None => CommandResult::succeeded(),
        };
        let stdout = match (spec.capture, self.stdout.get(&line)) {
            (true, Some(out)) => out.clone(),
            _ => String::new(),
        };
        Ok(result.with_stdout(stdout))
    }
}

/// Temporary project directory pre-populated with disposable directories.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Project with `.venv`, `.pytest_cache` and `dist` present.
    pub fn with_artifacts() -> Result<Self> {
        let project = Self::new()?;
        for dir in [".venv/bin", ".pytest_cache/v", "dist"] {
            project.create_dir(dir)?;
        }
        fs::write(project.path().join("dist").join("pkg-0.1.0.tar.gz"), b"stale")?;
        Ok(project)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    pub fn create_dir(&self, rel: &str) -> Result<()> {
        fs::create_dir_all(self.join(rel))?;
        Ok(())
    }
}
