//! Deterministic, pure logic shared by the bootstrap.
//!
//! Core modules must be free of I/O side effects. They describe stages,
//! commands, and outcomes as plain data suitable for tests.

pub mod stage;
pub mod types;
