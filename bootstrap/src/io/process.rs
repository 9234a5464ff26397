//! Running external tools as child processes.
//!
//! Children inherit the caller's stdin/stdout/stderr so tool output stays
//! visible, unless a [`CommandSpec`] asks for stdout to be captured.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

use crate::core::types::{CommandResult, CommandSpec};

pub const DEFAULT_CAPTURE_LIMIT_BYTES: usize = 64 * 1024;

/// Abstraction over process execution.
///
/// `Err` means the command could not be started or waited on. Any exit
/// status, including failure, comes back as `Ok(CommandResult)`.
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec, workdir: &Path) -> Result<CommandResult>;
}

/// Runner that spawns real processes.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    /// Kill the child after this long. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Captured stdout beyond this many bytes is drained and discarded.
    pub capture_limit_bytes: usize,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self {
            timeout: None,
            capture_limit_bytes: DEFAULT_CAPTURE_LIMIT_BYTES,
        }
    }
}

impl ProcessRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %spec, capture = spec.capture))]
    fn run(&self, spec: &CommandSpec, workdir: &Path) -> Result<CommandResult> {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args).envs(&spec.envs).current_dir(workdir);
        if spec.capture {
            cmd.stdout(Stdio::piped());
        }

        debug!("spawning child process");
        let mut child = match cmd.spawn() {
            Ok(c) => c,
            Err(e) => {
                error!(err = %e, "failed to spawn command");
                return Err(e).with_context(|| format!("spawn {}", spec.program));
            }
        };

        let stdout_handle = if spec.capture {
            let stdout = child
                .stdout
                .take()
                .ok_or_else(|| anyhow!("stdout was not piped"))?;
            let limit = self.capture_limit_bytes;
            Some(thread::spawn(move || read_stream_limited(stdout, limit)))
        } else {
            None
        };

        let (status, timed_out) = wait_child(&mut child, self.timeout)?;

        let stdout = match stdout_handle {
            // A grandchild may still hold the pipe open after the kill; the
            // reader thread is detached instead of joined.
            Some(_) if timed_out => {
                warn!("discarding captured output of timed out command");
                String::new()
            }
            Some(handle) => {
                let (buf, truncated) = join_output(handle).context("join stdout")?;
                if truncated > 0 {
                    warn!(truncated, "captured output truncated");
                }
                String::from_utf8_lossy(&buf).into_owned()
            }
            None => String::new(),
        };

        debug!(exit_code = ?status.code(), timed_out, "command finished");
        Ok(CommandResult {
            code: status.code(),
            success: status.success() && !timed_out,
            stdout,
            timed_out,
        })
    }
}

fn wait_child(child: &mut Child, timeout: Option<Duration>) -> Result<(ExitStatus, bool)> {
    let Some(timeout) = timeout else {
        let status = child.wait().context("wait for command")?;
        return Ok((status, false));
    };
    match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => Ok((status, false)),
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            child.kill().context("kill command")?;
            let status = child.wait().context("wait command after kill")?;
            Ok((status, true))
        }
    }
}

fn join_output(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        CommandSpec::new("sh", ["-c", script])
    }

    #[test]
    fn read_stream_limited_counts_truncated_bytes() {
        let input: &[u8] = b"abcdefghij";
        let (buf, truncated) = read_stream_limited(input, 4).expect("read");
        assert_eq!(buf, b"abcd");
        assert_eq!(truncated, 6);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let spec = CommandSpec::new("zz-no-such-tool-7f3a9c1e", ["--version"]);
        let err = SystemRunner::default().run(&spec, temp.path()).unwrap_err();
        assert!(err.to_string().contains("spawn zz-no-such-tool-7f3a9c1e"));
    }

    #[cfg(unix)]
    #[test]
    fn failure_exit_code_is_a_result_not_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let result = SystemRunner::default()
            .run(&sh("exit 3"), temp.path())
            .expect("run");
        assert!(!result.success);
        assert_eq!(result.code, Some(3));
        assert!(!result.timed_out);
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_with_child_env_and_workdir() {
        let temp = tempfile::tempdir().expect("tempdir");
        std::fs::write(temp.path().join("marker.txt"), "").expect("write");
        let mut spec = sh("printf '%s ' \"$BOOT_TEST_FLAG\"; ls").captured();
        spec.envs.insert("BOOT_TEST_FLAG".to_string(), "on".to_string());

        let result = SystemRunner::default().run(&spec, temp.path()).expect("run");
        assert!(result.success);
        assert!(result.stdout.starts_with("on "));
        assert!(result.stdout.contains("marker.txt"));
        assert!(std::env::var_os("BOOT_TEST_FLAG").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn capture_respects_limit() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = SystemRunner {
            timeout: None,
            capture_limit_bytes: 3,
        };
        let result = runner
            .run(&sh("printf 'abcdef'").captured(), temp.path())
            .expect("run");
        assert_eq!(result.stdout, "abc");
    }

    #[cfg(unix)]
    #[test]
    fn timeout_bounds_captured_command_with_lingering_grandchild() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = SystemRunner {
            timeout: Some(Duration::from_millis(200)),
            capture_limit_bytes: 16,
        };
        let started = std::time::Instant::now();
        let result = runner
            .run(&sh("(sleep 5) & sleep 5").captured(), temp.path())
            .expect("run");
        assert!(result.timed_out);
        assert!(result.stdout.is_empty());
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn timeout_kills_child() {
        let temp = tempfile::tempdir().expect("tempdir");
        let runner = SystemRunner {
            timeout: Some(Duration::from_millis(200)),
            capture_limit_bytes: 16,
        };
        let result = runner.run(&sh("sleep 5"), temp.path()).expect("run");
        assert!(result.timed_out);
        assert!(!result.success);
    }
}
