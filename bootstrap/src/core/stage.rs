//! Bootstrap stages and the order they run in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One state of the bootstrap sequence.
///
/// The seven working stages always run in declaration order. `SelfInstalled`
/// and `Completed` are terminal: once reached, nothing else runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Verify,
    Clean,
    Setup,
    Install,
    Format,
    Test,
    Build,
    SelfInstalled,
    Completed,
}

impl Stage {
    /// Working stages in execution order.
    pub const SEQUENCE: [Stage; 7] = [
        Stage::Verify,
        Stage::Clean,
        Stage::Setup,
        Stage::Install,
        Stage::Format,
        Stage::Test,
        Stage::Build,
    ];

    /// Stage that follows `self` on the normal path.
    ///
    /// `Verify` only moves to `Clean` when the package manager is present;
    /// the orchestrator jumps to `SelfInstalled` otherwise.
    pub fn next(self) -> Stage {
        match self {
            Stage::Verify => Stage::Clean,
            Stage::Clean => Stage::Setup,
            Stage::Setup => Stage::Install,
            Stage::Install => Stage::Format,
            Stage::Format => Stage::Test,
            Stage::Test => Stage::Build,
            Stage::Build | Stage::Completed => Stage::Completed,
            Stage::SelfInstalled => Stage::SelfInstalled,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::SelfInstalled | Stage::Completed)
    }

    /// Whether dependency-manager commands issued in this stage receive the
    /// manager environment entries.
    pub fn uses_manager_env(self) -> bool {
        matches!(
            self,
            Stage::Setup | Stage::Install | Stage::Format | Stage::Test | Stage::Build
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Verify => "verify",
            Stage::Clean => "clean",
            Stage::Setup => "setup",
            Stage::Install => "install",
            Stage::Format => "format",
            Stage::Test => "test",
            Stage::Build => "build",
            Stage::SelfInstalled => "self_installed",
            Stage::Completed => "completed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
