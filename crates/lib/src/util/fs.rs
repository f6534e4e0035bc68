//! Content-aware file writes.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;

/// What a content-aware write did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
  Created,
  Updated,
  Unchanged,
}

/// Whether `path` already holds exactly `contents`.
pub fn has_contents(path: &Path, contents: &str) -> bool {
  fs::read(path).is_ok_and(|existing| existing == contents.as_bytes())
}

/// Write `contents` to `path` unless it already holds them, creating parent
/// directories as needed.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<FileOutcome> {
  let outcome = match fs::read(path) {
    Ok(existing) if existing == contents.as_bytes() => return Ok(FileOutcome::Unchanged),
    Ok(_) => FileOutcome::Updated,
    Err(e) if e.kind() == io::ErrorKind::NotFound => FileOutcome::Created,
    Err(e) => return Err(e),
  };

  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, contents)?;
  Ok(outcome)
}
