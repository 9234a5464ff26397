//! Executable lookup on the search path.

use std::path::PathBuf;

use tracing::debug;

/// Answers whether a named executable can be resolved.
///
/// Absence is a normal answer, never an error.
pub trait ToolProbe {
    fn is_available(&self, name: &str) -> bool;
}

/// Probe backed by `PATH` lookup.
pub struct PathProbe;

impl PathProbe {
    /// Resolved location of `name`, if any.
    pub fn locate(name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

impl ToolProbe for PathProbe {
    fn is_available(&self, name: &str) -> bool {
        let found = Self::locate(name);
        debug!(tool = name, path = ?found, "probed tool");
        found.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn finds_known_executable() {
        assert!(PathProbe.is_available("sh"));
    }

    #[test]
    fn misses_unlikely_name() {
        assert!(!PathProbe.is_available("zz-no-such-tool-7f3a9c1e"));
    }
}
