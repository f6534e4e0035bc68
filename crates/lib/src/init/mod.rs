//! Project initialization: version pin, manifest and compiler config.
//!
//! The manifest and compiler config are produced by the package manager and
//! the compiler themselves (`npm init -y`, `npx tsc --init`); this module
//! only launches them and checks that the expected file appeared.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::consts::{COMPILER_CONFIG_FILE, MANIFEST_FILE, VERSION_PIN_FILE};
use crate::execute::{CommandRunner, ExecuteError, Invocation};
use crate::util::fs::{FileOutcome, has_contents, write_if_changed};

/// Errors that can occur during initialization.
#[derive(Debug, Error)]
pub enum InitError {
  #[error("failed to write file {}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error(transparent)]
  Execute(#[from] ExecuteError),

  #[error("`{cmd}` succeeded but did not create {}", path.display())]
  NotGenerated { cmd: String, path: PathBuf },
}

/// Content of the version pin file for a runtime version string.
pub fn version_pin_contents(version: &str) -> String {
  format!("{}\n", version.trim())
}

pub fn version_pin_is_current(dir: &Path, version: &str) -> bool {
  has_contents(&dir.join(VERSION_PIN_FILE), &version_pin_contents(version))
}

/// Record the runtime version in `.nvmrc`.
pub fn write_version_pin(dir: &Path, version: &str) -> Result<FileOutcome, InitError> {
  let path = dir.join(VERSION_PIN_FILE);
  let outcome = write_if_changed(&path, &version_pin_contents(version))
    .map_err(|source| InitError::WriteFile { path: path.clone(), source })?;
  info!(path = %path.display(), version = %version.trim(), ?outcome, "wrote version pin");
  Ok(outcome)
}

/// Run `npm init -y` in `dir`.
pub async fn generate_manifest<R: CommandRunner>(runner: &R, npm: &Path, dir: &Path) -> Result<PathBuf, InitError> {
  let invocation = Invocation::new(npm, dir).args(["init", "-y"]);
  run_generator(runner, invocation, dir.join(MANIFEST_FILE)).await
}

/// Run `npx tsc --init` in `dir`. TypeScript must already be installed.
pub async fn generate_compiler_config<R: CommandRunner>(
  runner: &R,
  npx: &Path,
  dir: &Path,
) -> Result<PathBuf, InitError> {
  let invocation = Invocation::new(npx, dir).args(["tsc", "--init"]);
  run_generator(runner, invocation, dir.join(COMPILER_CONFIG_FILE)).await
}

async fn run_generator<R: CommandRunner>(
  runner: &R,
  invocation: Invocation,
  expected: PathBuf,
) -> Result<PathBuf, InitError> {
  runner.run(&invocation).await?;
  if !expected.is_file() {
    return Err(InitError::NotGenerated {
      cmd: invocation.to_string(),
      path: expected,
    });
  }
  info!(cmd = %invocation, path = %expected.display(), "generated file");
  Ok(expected)
}
