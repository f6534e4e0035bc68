//! Static files with constant content.
//!
//! Files are written whenever their content differs from what is on disk,
//! replacing whatever was there; nothing is merged.

mod templates;

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::util::fs::{FileOutcome, has_contents, write_if_changed};

pub use templates::{ESLINT_CONFIG, GITIGNORE, INDEX_TS, PRETTIERRC, VSCODE_SETTINGS};

#[derive(Debug, Error)]
pub enum EmitError {
  #[error("failed to write file {}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },
}

/// A file path relative to the project root and its fixed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StaticFile {
  pub path: &'static str,
  #[serde(skip)]
  pub contents: &'static str,
}

pub const FORMATTER_CONFIG: StaticFile = StaticFile {
  path: ".prettierrc",
  contents: PRETTIERRC,
};

pub const LINTER_CONFIG: StaticFile = StaticFile {
  path: "eslint.config.mjs",
  contents: ESLINT_CONFIG,
};

pub const EDITOR_SETTINGS: StaticFile = StaticFile {
  path: ".vscode/settings.json",
  contents: VSCODE_SETTINGS,
};

pub const IGNORE_RULES: StaticFile = StaticFile {
  path: ".gitignore",
  contents: GITIGNORE,
};

pub const EXAMPLE_SOURCE: StaticFile = StaticFile {
  path: "src/index.ts",
  contents: INDEX_TS,
};

/// Every static file, in the order the pipeline writes them.
pub const STATIC_FILES: [StaticFile; 5] = [
  FORMATTER_CONFIG,
  LINTER_CONFIG,
  EDITOR_SETTINGS,
  IGNORE_RULES,
  EXAMPLE_SOURCE,
];

impl StaticFile {
  pub fn target(&self, dir: &Path) -> PathBuf {
    self.path.split('/').fold(dir.to_path_buf(), |acc, part| acc.join(part))
  }

  pub fn is_current(&self, dir: &Path) -> bool {
    has_contents(&self.target(dir), self.contents)
  }

  /// Write the file under `dir`, creating parent directories.
  pub fn emit(&self, dir: &Path) -> Result<FileOutcome, EmitError> {
    let path = self.target(dir);
    let outcome = write_if_changed(&path, self.contents).map_err(|source| EmitError::WriteFile {
      path: path.clone(),
      source,
    })?;
    info!(path = %path.display(), ?outcome, "emitted file");
    Ok(outcome)
  }
}
