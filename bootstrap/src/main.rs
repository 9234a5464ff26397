//! `bootstrap`: prepare a project-local development environment.
//!
//! With no arguments, runs the default pipenv workflow in the current
//! directory. A `bootstrap.toml` in the project root overrides tool names
//! and arguments.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use bootstrap::core::types::FailurePolicy;
use bootstrap::exit_codes;
use bootstrap::io::config::{CONFIG_FILE_NAME, load_config};
use bootstrap::io::probe::PathProbe;
use bootstrap::io::process::SystemRunner;
use bootstrap::orchestrator::run_bootstrap;
use bootstrap::report::{render_summary, write_report};
use clap::Parser;

#[derive(Parser)]
#[command(
    name = "bootstrap",
    version,
    about = "Set up a project-local virtual environment, then format, test and build"
)]
struct Cli {
    /// Project root (defaults to the current directory).
    #[arg(short = 'C', long)]
    project_dir: Option<PathBuf>,

    /// Config file (defaults to `bootstrap.toml` in the project root, if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first failed command instead of continuing.
    #[arg(long)]
    fail_fast: bool,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() {
    bootstrap::logging::init();
    match run(Cli::parse()) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("resolve current directory")?,
    };
    if !root.is_dir() {
        bail!("project directory {} does not exist", root.display());
    }

    let mut cfg = match &cli.config {
        Some(path) if !path.exists() => bail!("config file {} not found", path.display()),
        Some(path) => load_config(path)?,
        None => load_config(&root.join(CONFIG_FILE_NAME))?,
    };
    if cli.fail_fast {
        cfg.on_failure = FailurePolicy::Halt;
    }

    let runner = SystemRunner {
        timeout: cfg.step_timeout(),
        capture_limit_bytes: cfg.capture_limit_bytes,
    };
    let outcome = run_bootstrap(&root, &cfg, &PathProbe, &runner)?;

    if let Some(path) = &cli.report {
        write_report(path, &outcome)?;
    }
    print!("{}", render_summary(&outcome));
    Ok(exit_codes::for_outcome(&outcome))
}
