//! Command lines issued by each bootstrap stage.

use crate::core::stage::Stage;
use crate::core::types::CommandSpec;
use crate::io::config::BootstrapConfig;

/// `<interpreter> -m pip install --user <args..>`
pub fn pip_install(cfg: &BootstrapConfig, args: &[&str]) -> CommandSpec {
    let mut full = vec!["-m", "pip", "install", "--user"];
    full.extend_from_slice(args);
    CommandSpec::new(&cfg.interpreter, full)
}

/// Commands for the self-install branch, in order.
pub fn self_install(cfg: &BootstrapConfig) -> Vec<CommandSpec> {
    vec![
        pip_install(cfg, &["--upgrade", "pip"]),
        pip_install(cfg, &[cfg.manager.as_str()]),
    ]
}

/// Query for the interpreter's user base directory (stdout captured).
pub fn user_base_query(cfg: &BootstrapConfig) -> CommandSpec {
    CommandSpec::new(&cfg.interpreter, ["-m", "site", "--user-base"]).captured()
}

/// Shell expression that resolves the user base when the profile is sourced.
pub fn user_base_shell_lookup(cfg: &BootstrapConfig) -> String {
    format!("$({} -m site --user-base)", cfg.interpreter)
}

/// Shell profile hint shown after a self-install.
pub fn path_hint(user_base: &str) -> String {
    format!(
        "Add this to your .bashrc or .zshrc\nexport PATH={}/bin:$PATH",
        user_base.trim()
    )
}

/// `<manager> <args..>`, with the manager environment applied from setup on.
fn manager(cfg: &BootstrapConfig, stage: Stage, args: &[&str]) -> CommandSpec {
    let spec = CommandSpec::new(&cfg.manager, args.iter().copied());
    if stage.uses_manager_env() {
        spec.with_envs(&cfg.manager_env)
    } else {
        spec
    }
}

/// `<manager> run python -m <module> <args..>`
fn manager_run(cfg: &BootstrapConfig, stage: Stage, module: &str, args: &[String]) -> CommandSpec {
    let mut full = vec!["run", "python", "-m", module];
    full.extend(args.iter().map(String::as_str));
    manager(cfg, stage, &full)
}

/// External commands run by `stage`.
///
/// Verify and the terminal states issue nothing here; the self-install
/// branch is built by [`self_install`]. Clean also removes directories,
/// which the orchestrator does after these commands.
pub fn for_stage(cfg: &BootstrapConfig, stage: Stage) -> Vec<CommandSpec> {
    match stage {
        Stage::Clean => vec![manager(cfg, stage, &["--rm"])],
        Stage::Setup => vec![manager(cfg, stage, &["install", "--dev"])],
        Stage::Install => vec![manager(cfg, stage, &["install", "-e", "."])],
        Stage::Format => vec![manager_run(cfg, stage, &cfg.formatter, &cfg.format_targets)],
        Stage::Test => vec![manager_run(cfg, stage, &cfg.test_runner, &[])],
        Stage::Build => vec![manager_run(cfg, stage, &cfg.build_module, &[])],
        Stage::Verify | Stage::SelfInstalled | Stage::Completed => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(specs: &[CommandSpec]) -> Vec<String> {
        specs.iter().map(CommandSpec::display_line).collect()
    }

    #[test]
    fn self_install_upgrades_pip_then_installs_manager() {
        let cfg = BootstrapConfig::default();
        assert_eq!(
            lines(&self_install(&cfg)),
            vec![
                "python3 -m pip install --user --upgrade pip",
                "python3 -m pip install --user pipenv",
            ]
        );
    }

    #[test]
    fn default_stage_commands() {
        let cfg = BootstrapConfig::default();
        let all: Vec<String> = Stage::SEQUENCE
            .iter()
            .flat_map(|stage| lines(&for_stage(&cfg, *stage)))
            .collect();
        assert_eq!(
            all,
            vec![
                "pipenv --rm",
                "pipenv install --dev",
                "pipenv install -e .",
                "pipenv run python -m black src tests",
                "pipenv run python -m pytest",
                "pipenv run python -m build",
            ]
        );
    }

    #[test]
    fn manager_env_applies_from_setup_on() {
        let cfg = BootstrapConfig::default();
        let clean = &for_stage(&cfg, Stage::Clean)[0];
        let setup = &for_stage(&cfg, Stage::Setup)[0];
        let build = &for_stage(&cfg, Stage::Build)[0];
        assert!(clean.envs.is_empty());
        assert_eq!(
            setup.envs.get("PIPENV_VENV_IN_PROJECT").map(String::as_str),
            Some("1")
        );
        assert_eq!(setup.envs, build.envs);
    }

    #[test]
    fn path_hint_appends_bin() {
        assert_eq!(
            path_hint("/home/dev/.local\n"),
            "Add this to your .bashrc or .zshrc\nexport PATH=/home/dev/.local/bin:$PATH"
        );
    }

    #[test]
    fn fallback_hint_defers_lookup_to_shell() {
        let cfg = BootstrapConfig::default();
        assert_eq!(
            path_hint(&user_base_shell_lookup(&cfg)),
            "Add this to your .bashrc or .zshrc\nexport PATH=$(python3 -m site --user-base)/bin:$PATH"
        );
    }

    #[test]
    fn user_base_query_is_captured() {
        let spec = user_base_query(&BootstrapConfig::default());
        assert!(spec.capture);
        assert_eq!(spec.display_line(), "python3 -m site --user-base");
    }
}
