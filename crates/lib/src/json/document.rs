//! A JSON file loaded for editing.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::{EditError, EditSummary, JsonEdit, apply_edits, strip_jsonc};

#[derive(Debug, Error)]
pub enum DocumentError {
  #[error("failed to read {}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}", path.display())]
  Parse { path: PathBuf, source: serde_json::Error },

  #[error("cannot edit {}", path.display())]
  Edit { path: PathBuf, source: EditError },

  #[error("failed to serialize {}", path.display())]
  Serialize { path: PathBuf, source: serde_json::Error },

  #[error("failed to write {}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// A parsed JSON file together with the text it was read from.
///
/// Key order is preserved, so rendering an unedited document only normalises
/// whitespace (and drops comments when it was loaded as JSONC).
#[derive(Debug, Clone)]
pub struct JsonDocument {
  path: PathBuf,
  original: String,
  value: Value,
}

impl JsonDocument {
  /// Load a strict JSON file.
  pub fn load(path: &Path) -> Result<Self, DocumentError> {
    Self::load_with(path, |text| text.to_string())
  }

  /// Load a JSON-with-comments file such as `tsconfig.json`.
  pub fn load_jsonc(path: &Path) -> Result<Self, DocumentError> {
    Self::load_with(path, strip_jsonc)
  }

  fn load_with(path: &Path, prepare: impl Fn(&str) -> String) -> Result<Self, DocumentError> {
    let original = fs::read_to_string(path).map_err(|source| DocumentError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let value = serde_json::from_str(&prepare(&original)).map_err(|source| DocumentError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    Ok(Self {
      path: path.to_path_buf(),
      original,
      value,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn value(&self) -> &Value {
    &self.value
  }

  pub fn apply(&mut self, edits: &[JsonEdit]) -> Result<EditSummary, DocumentError> {
    let summary = apply_edits(&mut self.value, edits).map_err(|source| DocumentError::Edit {
      path: self.path.clone(),
      source,
    })?;
    debug!(
      path = %self.path.display(),
      changed = summary.changed.len(),
      unchanged = summary.unchanged.len(),
      "applied edits"
    );
    Ok(summary)
  }

  /// Pretty-printed JSON with two-space indentation and a final newline.
  pub fn render(&self) -> Result<String, DocumentError> {
    let mut text = serde_json::to_string_pretty(&self.value).map_err(|source| DocumentError::Serialize {
      path: self.path.clone(),
      source,
    })?;
    text.push('\n');
    Ok(text)
  }

  /// Write the document back if its rendering differs from the file on disk.
  ///
  /// Returns whether the file was written.
  pub fn save(&mut self) -> Result<bool, DocumentError> {
    let text = self.render()?;
    if text == self.original {
      return Ok(false);
    }
    fs::write(&self.path, &text).map_err(|source| DocumentError::Write {
      path: self.path.clone(),
      source,
    })?;
    self.original = text;
    Ok(true)
  }
}
