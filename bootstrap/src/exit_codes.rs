//! Stable exit codes for the bootstrap CLI.

use crate::core::types::BootstrapOutcome;

/// Run completed, or the package manager was just self-installed.
pub const OK: i32 = 0;
/// Invalid config, unreadable files, or a filesystem fault during cleanup.
pub const INVALID: i32 = 1;
/// A command failed and the failure policy is `halt`.
pub const HALTED: i32 = 2;

/// Exit code for a finished run.
///
/// Failed steps under the `continue` policy still exit with [`OK`].
pub fn for_outcome(outcome: &BootstrapOutcome) -> i32 {
    match outcome {
        BootstrapOutcome::SelfInstalled { .. } | BootstrapOutcome::Completed { .. } => OK,
        BootstrapOutcome::Halted { .. } => HALTED,
    }
}
