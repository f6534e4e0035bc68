//! Types for command execution.

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The process could not be started at all.
  #[error("failed to start {program}")]
  Spawn { program: String, source: std::io::Error },

  /// Command exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}{}", format_stderr(.stderr))]
  CmdFailed {
    cmd: String,
    code: Option<i32>,
    stderr: String,
  },
}

fn format_stderr(stderr: &str) -> String {
  let stderr = stderr.trim();
  if stderr.is_empty() {
    String::new()
  } else {
    format!("\n{}", stderr)
  }
}

/// A single command line to run in a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: PathBuf,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl Invocation {
  pub fn new(program: impl Into<PathBuf>, cwd: &Path) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.to_path_buf(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  /// Program name without its directory, as a user would type it.
  pub fn program_name(&self) -> String {
    self
      .program
      .file_stem()
      .unwrap_or(self.program.as_os_str())
      .to_string_lossy()
      .into_owned()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program_name())?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// Runs invocations and returns their trimmed stdout.
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<String, ExecuteError>> + Send;
}
