//! Side-effecting helpers: config files, tool lookup, processes, cleanup.

pub mod cleaner;
pub mod config;
pub mod probe;
pub mod process;
