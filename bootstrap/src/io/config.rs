//! Bootstrap configuration read from `bootstrap.toml` in the project root.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::types::FailurePolicy;

/// File name looked up in the project root when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "bootstrap.toml";

/// Bootstrap configuration (TOML).
///
/// Every field is optional. The defaults reproduce the fixed pipenv
/// workflow: `pipenv` installed through `python3 -m pip`, `black` for
/// formatting, `pytest` for tests and `python -m build` for packaging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Base interpreter used for the self-install branch (`<interpreter> -m pip`).
    pub interpreter: String,

    /// Package/dependency manager that must be on PATH.
    pub manager: String,

    /// Project-local virtual environment directory.
    pub venv_dir: String,

    /// Cache and build output directories removed during clean.
    pub clean_dirs: Vec<String>,

    /// Entries merged into the environment of every manager command from
    /// the setup stage onward.
    pub manager_env: BTreeMap<String, String>,

    pub formatter: String,
    pub format_targets: Vec<String>,
    pub test_runner: String,
    pub build_module: String,

    pub on_failure: FailurePolicy,

    /// Kill any single command that runs longer than this. Unset means wait forever.
    pub step_timeout_secs: Option<u64>,

    /// Truncate captured stdout beyond this many bytes.
    pub capture_limit_bytes: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            manager: "pipenv".to_string(),
            venv_dir: ".venv".to_string(),
            clean_dirs: vec![".pytest_cache".to_string(), "dist".to_string()],
            manager_env: BTreeMap::from([(
                "PIPENV_VENV_IN_PROJECT".to_string(),
                "1".to_string(),
            )]),
            formatter: "black".to_string(),
            format_targets: vec!["src".to_string(), "tests".to_string()],
            test_runner: "pytest".to_string(),
            build_module: "build".to_string(),
            on_failure: FailurePolicy::Continue,
            step_timeout_secs: None,
            capture_limit_bytes: 64 * 1024,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("interpreter", &self.interpreter),
            ("manager", &self.manager),
            ("formatter", &self.formatter),
            ("test_runner", &self.test_runner),
            ("build_module", &self.build_module),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("{field} must be non-empty"));
            }
        }
        validate_disposable_dir("venv_dir", &self.venv_dir)?;
        for dir in &self.clean_dirs {
            validate_disposable_dir("clean_dirs", dir)?;
        }
        if self
            .manager_env
            .keys()
            .any(|key| key.is_empty() || key.contains('='))
        {
            return Err(anyhow!(
                "manager_env keys must be non-empty and contain no '='"
            ));
        }
        if self.step_timeout_secs == Some(0) {
            return Err(anyhow!("step_timeout_secs must be > 0 when set"));
        }
        if self.capture_limit_bytes == 0 {
            return Err(anyhow!("capture_limit_bytes must be > 0"));
        }
        Ok(())
    }

    pub fn step_timeout(&self) -> Option<Duration> {
        self.step_timeout_secs.map(Duration::from_secs)
    }

    /// Directories removed by the clean stage, venv first.
    pub fn dirs_to_clean(&self) -> Vec<&str> {
        std::iter::once(self.venv_dir.as_str())
            .chain(self.clean_dirs.iter().map(String::as_str))
            .collect()
    }
}

/// Cleaned paths must stay inside the project root.
fn validate_disposable_dir(field: &str, dir: &str) -> Result<()> {
    if dir.trim().is_empty() {
        return Err(anyhow!("{field} entries must be non-empty"));
    }
    let path = Path::new(dir);
    let escapes = path.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if escapes || path.components().all(|c| c == Component::CurDir) {
        return Err(anyhow!(
            "{field} entry {dir:?} must be a relative path inside the project"
        ));
    }
    Ok(())
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BootstrapConfig::default()`.
pub fn load_config(path: &Path) -> Result<BootstrapConfig> {
    if !path.exists() {
        let cfg = BootstrapConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BootstrapConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
