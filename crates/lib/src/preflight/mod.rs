//! Preflight checks run before anything is written.
//!
//! - resolve the `node`, `npm` and `npx` executables
//! - require the configured runtime major version
//! - classify the target directory (missing, empty, non-empty)
//!
//! Nothing here touches the filesystem beyond reading the directory listing.
//! Asking the operator about a non-empty directory is the caller's job.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use semver::Version;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;
use crate::execute::{CommandRunner, ExecuteError, Invocation};

#[derive(Debug, Error)]
pub enum PreflightError {
  #[error("`{tool}` was not found on PATH")]
  ToolNotFound { tool: &'static str, source: which::Error },

  #[error("failed to query runtime version")]
  RuntimeQuery(#[from] ExecuteError),

  #[error("unrecognised runtime version {raw:?}")]
  InvalidVersion { raw: String, source: semver::Error },

  #[error("node {found} is installed but major version {required} is required")]
  RuntimeMismatch { found: String, required: u64 },

  #[error("{} exists but is not a directory", path.display())]
  NotADirectory { path: PathBuf },

  #[error("failed to read directory {}", path.display())]
  ReadDir { path: PathBuf, source: io::Error },
}

/// Executables the pipeline invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
  pub node: PathBuf,
  pub npm: PathBuf,
  pub npx: PathBuf,
}

impl Toolchain {
  /// Use explicit paths from settings, otherwise search PATH.
  pub fn resolve(settings: &Settings) -> Result<Self, PreflightError> {
    Ok(Self {
      node: resolve_tool("node", settings.node.as_deref())?,
      npm: resolve_tool("npm", settings.npm.as_deref())?,
      npx: resolve_tool("npx", settings.npx.as_deref())?,
    })
  }
}

fn resolve_tool(name: &'static str, configured: Option<&Path>) -> Result<PathBuf, PreflightError> {
  let path = match configured {
    Some(path) => path.to_path_buf(),
    None => which::which(name).map_err(|source| PreflightError::ToolNotFound { tool: name, source })?,
  };
  debug!(tool = name, path = %path.display(), "resolved tool");
  Ok(path)
}

/// The installed runtime version, as reported and as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion {
  /// Exactly what `node --version` printed, trimmed (e.g. `v22.4.0`).
  pub raw: String,
  pub version: Version,
}

impl RuntimeVersion {
  pub fn major(&self) -> u64 {
    self.version.major
  }
}

/// Parse `v22.4.0`-style output. The leading `v` is optional.
pub fn parse_runtime_version(raw: &str) -> Result<RuntimeVersion, PreflightError> {
  let trimmed = raw.trim();
  let numeric = trimmed.strip_prefix('v').unwrap_or(trimmed);
  let version = Version::parse(numeric).map_err(|source| PreflightError::InvalidVersion {
    raw: trimmed.to_string(),
    source,
  })?;
  Ok(RuntimeVersion {
    raw: trimmed.to_string(),
    version,
  })
}

/// Parse the reported version and require the given major.
pub fn check_runtime_version(raw: &str, required_major: u64) -> Result<RuntimeVersion, PreflightError> {
  let runtime = parse_runtime_version(raw)?;
  if runtime.major() != required_major {
    return Err(PreflightError::RuntimeMismatch {
      found: runtime.raw,
      required: required_major,
    });
  }
  Ok(runtime)
}

/// Ask the runtime for its version and check it.
pub async fn detect_runtime_version<R: CommandRunner>(
  runner: &R,
  node: &Path,
  cwd: &Path,
  required_major: u64,
) -> Result<RuntimeVersion, PreflightError> {
  let output = runner.run(&Invocation::new(node, cwd).arg("--version")).await?;
  let runtime = check_runtime_version(&output, required_major)?;
  info!(version = %runtime.raw, "runtime version accepted");
  Ok(runtime)
}

/// State of the target directory before scaffolding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
  /// Does not exist yet and will be created.
  Missing,
  Empty,
  /// Holds the listed entries (file names, sorted).
  NonEmpty { entries: Vec<String> },
}

impl DirectoryState {
  pub fn needs_confirmation(&self) -> bool {
    matches!(self, DirectoryState::NonEmpty { .. })
  }
}

pub fn inspect_directory(path: &Path) -> Result<DirectoryState, PreflightError> {
  let read_dir = match fs::read_dir(path) {
    Ok(read_dir) => read_dir,
    Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(DirectoryState::Missing),
    Err(_) if path.exists() && !path.is_dir() => {
      return Err(PreflightError::NotADirectory {
        path: path.to_path_buf(),
      });
    }
    Err(source) => {
      return Err(PreflightError::ReadDir {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  let mut entries = read_dir
    .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
    .collect::<Result<Vec<_>, _>>()
    .map_err(|source| PreflightError::ReadDir {
      path: path.to_path_buf(),
      source,
    })?;

  if entries.is_empty() {
    return Ok(DirectoryState::Empty);
  }
  entries.sort();
  Ok(DirectoryState::NonEmpty { entries })
}

/// Everything preflight learned, handed on to the pipeline.
#[derive(Debug, Clone)]
pub struct PreflightReport {
  pub runtime: RuntimeVersion,
  pub directory: DirectoryState,
}

/// Run every check in order: runtime first, then the directory.
pub async fn run_preflight<R: CommandRunner>(
  runner: &R,
  toolchain: &Toolchain,
  settings: &Settings,
  dir: &Path,
) -> Result<PreflightReport, PreflightError> {
  // Run the version query from an existing directory; `dir` may not exist yet.
  let query_dir = if dir.is_dir() { dir.to_path_buf() } else { std::env::temp_dir() };
  let runtime = detect_runtime_version(runner, &toolchain.node, &query_dir, settings.node_major).await?;
  let directory = inspect_directory(dir)?;
  debug!(dir = %dir.display(), state = ?directory, "inspected target directory");
  Ok(PreflightReport { runtime, directory })
}
