//! User settings for tsinit.
//!
//! Settings are layered: built-in defaults, then the optional
//! `config.json` in the user config directory, then `TSINIT_*` environment
//! variables. The CLI applies its own flags on top.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_NODE_MAJOR, SETTINGS_FILE};
use crate::platform::paths::config_dir;

pub const ENV_NODE_MAJOR: &str = "TSINIT_NODE_MAJOR";
pub const ENV_NODE: &str = "TSINIT_NODE";
pub const ENV_NPM: &str = "TSINIT_NPM";
pub const ENV_NPX: &str = "TSINIT_NPX";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read settings {}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse settings {}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("invalid value for {var}: {value:?}")]
  InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Runtime major version the project is pinned to.
  pub node_major: u64,
  /// Explicit path to the `node` binary (otherwise looked up on PATH).
  pub node: Option<PathBuf>,
  /// Explicit path to the `npm` binary.
  pub npm: Option<PathBuf>,
  /// Explicit path to the `npx` binary.
  pub npx: Option<PathBuf>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      node_major: DEFAULT_NODE_MAJOR,
      node: None,
      npm: None,
      npx: None,
    }
  }
}

impl Settings {
  /// Load settings from the user config directory and the environment.
  pub fn load() -> Result<Self, ConfigError> {
    let settings = match config_dir() {
      Some(dir) => Self::load_from(&dir.join(SETTINGS_FILE))?,
      None => Self::default(),
    };
    settings.with_env_overrides()
  }

  /// Load settings from a file, falling back to defaults when it is absent.
  pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let settings = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    debug!(path = %path.display(), "loaded settings");
    Ok(settings)
  }

  /// Apply `TSINIT_*` environment variables on top of these settings.
  pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
    if let Ok(value) = std::env::var(ENV_NODE_MAJOR) {
      self.node_major = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: ENV_NODE_MAJOR,
        value: value.clone(),
      })?;
    }
    if let Some(node) = std::env::var_os(ENV_NODE) {
      self.node = Some(PathBuf::from(node));
    }
    if let Some(npm) = std::env::var_os(ENV_NPM) {
      self.npm = Some(PathBuf::from(npm));
    }
    if let Some(npx) = std::env::var_os(ENV_NPX) {
      self.npx = Some(PathBuf::from(npx));
    }
    Ok(self)
  }

  /// Package providing the recommended compiler config for the pinned runtime.
  pub fn tsconfig_base(&self) -> String {
    format!("@tsconfig/node{}", self.node_major)
  }
}
