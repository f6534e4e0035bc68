//! Development dependency groups and their installation.
//!
//! Each group is installed with a single `npm install --save-dev` call that
//! names the group's full, fixed package list.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::execute::{CommandRunner, ExecuteError, Invocation};

#[derive(Debug, Error)]
pub enum InstallError {
  #[error("failed to install {group} dependencies")]
  Failed {
    group: &'static str,
    #[source]
    source: ExecuteError,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyGroup {
  pub name: &'static str,
  pub packages: Vec<String>,
}

impl DependencyGroup {
  fn new(name: &'static str, packages: &[&str]) -> Self {
    Self {
      name,
      packages: packages.iter().map(|p| p.to_string()).collect(),
    }
  }

  /// Compiler, runner, runtime typings and the recommended base config.
  pub fn typescript(tsconfig_base: &str) -> Self {
    Self::new("typescript", &["typescript", "tsx", "@types/node", tsconfig_base])
  }

  pub fn formatter() -> Self {
    Self::new("formatter", &["prettier"])
  }

  pub fn linter() -> Self {
    Self::new("linter", &["eslint", "@eslint/js"])
  }

  pub fn linter_plugin() -> Self {
    Self::new("linter-plugin", &["typescript-eslint", "eslint-config-prettier"])
  }

  pub fn invocation(&self, npm: &Path, dir: &Path) -> Invocation {
    Invocation::new(npm, dir)
      .args(["install", "--save-dev"])
      .args(self.packages.iter().cloned())
  }
}

/// Install one group. Failures are not retried.
pub async fn install_group<R: CommandRunner>(
  runner: &R,
  npm: &Path,
  dir: &Path,
  group: &DependencyGroup,
) -> Result<(), InstallError> {
  info!(group = group.name, packages = ?group.packages, "installing dependencies");
  runner
    .run(&group.invocation(npm, dir))
    .await
    .map_err(|source| InstallError::Failed {
      group: group.name,
      source,
    })?;
  Ok(())
}
