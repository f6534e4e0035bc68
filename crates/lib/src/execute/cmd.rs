//! Subprocess execution through tokio.
//!
//! Commands inherit the caller's environment: the package manager needs the
//! user's PATH, registry configuration and caches.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::types::{CommandRunner, ExecuteError, Invocation};

/// Runs invocations as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  async fn run(&self, invocation: &Invocation) -> Result<String, ExecuteError> {
    info!(cmd = %invocation, cwd = %invocation.cwd.display(), "executing command");

    let output = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .stdin(Stdio::null())
      .output()
      .await
      .map_err(|source| ExecuteError::Spawn {
        program: invocation.program.display().to_string(),
        source,
      })?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !stdout.is_empty() {
      debug!(stdout = %stdout, "command stdout");
    }
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    if !output.status.success() {
      return Err(ExecuteError::CmdFailed {
        cmd: invocation.to_string(),
        code: output.status.code(),
        stderr,
      });
    }

    Ok(stdout)
  }
}
