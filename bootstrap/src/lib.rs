//! Project development-environment bootstrap.
//!
//! Prepares a project-local virtual environment by driving external tools
//! in a fixed order: verify the package manager, clean, set up the
//! environment, install the project in editable mode, format, test, build.
//!
//! - **[`core`]**: Pure data: stages, command specs, outcomes, failure policy.
//! - **[`io`]**: Side effects: config files, `PATH` lookup, child processes,
//!   directory removal. Traits at this boundary let tests swap in fakes.
//!
//! [`orchestrator`] ties the two together; [`commands`] decides what each
//! stage runs.

pub mod commands;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod orchestrator;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
