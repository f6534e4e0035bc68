//! Structured edits on JSON documents.
//!
//! An edit names a key path (`["compilerOptions", "outDir"]`) and a desired
//! state. Applying an edit either changes the document or reports that the
//! desired state already holds, so an edit list can be replayed safely.
//! Targets that cannot be reached are errors rather than silent no-ops.

mod document;
mod jsonc;

use serde_json::{Map, Value};
use thiserror::Error;

pub use document::{DocumentError, JsonDocument};
pub use jsonc::strip_jsonc;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
  #[error("document root is not an object")]
  RootNotObject,

  #[error("'{path}' exists but is not an object")]
  NotAnObject { path: String },

  #[error("edit has an empty key path")]
  EmptyPath,
}

/// Where a newly inserted key goes among its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Position {
  Last,
  First,
  /// Directly after the named sibling, or last if the sibling is absent.
  After(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
  Changed,
  Unchanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsonEdit {
  /// Make sure an object exists at `path`.
  EnsureObject { path: Vec<String>, position: Position },
  /// Set `path` to `value`, creating missing parent objects.
  Set {
    path: Vec<String>,
    value: Value,
    position: Position,
  },
  /// Remove `path`; with `only_if`, only when it currently holds that value.
  Remove { path: Vec<String>, only_if: Option<Value> },
}

fn to_path(path: &[&str]) -> Vec<String> {
  path.iter().map(|s| s.to_string()).collect()
}

impl JsonEdit {
  pub fn ensure_object(path: &[&str]) -> Self {
    JsonEdit::EnsureObject {
      path: to_path(path),
      position: Position::Last,
    }
  }

  pub fn ensure_object_after(path: &[&str], sibling: &str) -> Self {
    JsonEdit::EnsureObject {
      path: to_path(path),
      position: Position::After(sibling.to_string()),
    }
  }

  pub fn set(path: &[&str], value: Value) -> Self {
    JsonEdit::Set {
      path: to_path(path),
      value,
      position: Position::Last,
    }
  }

  pub fn set_first(path: &[&str], value: Value) -> Self {
    JsonEdit::Set {
      path: to_path(path),
      value,
      position: Position::First,
    }
  }

  pub fn set_after(path: &[&str], value: Value, sibling: &str) -> Self {
    JsonEdit::Set {
      path: to_path(path),
      value,
      position: Position::After(sibling.to_string()),
    }
  }

  pub fn remove(path: &[&str]) -> Self {
    JsonEdit::Remove {
      path: to_path(path),
      only_if: None,
    }
  }

  pub fn remove_if(path: &[&str], expected: Value) -> Self {
    JsonEdit::Remove {
      path: to_path(path),
      only_if: Some(expected),
    }
  }

  pub fn path(&self) -> &[String] {
    match self {
      JsonEdit::EnsureObject { path, .. } | JsonEdit::Set { path, .. } | JsonEdit::Remove { path, .. } => path,
    }
  }

  /// Dotted form of the key path, e.g. `scripts.build`.
  pub fn path_display(&self) -> String {
    self.path().join(".")
  }

  pub fn apply(&self, root: &mut Value) -> Result<EditOutcome, EditError> {
    let (parents, key) = self.path().split_last().map(|(k, p)| (p, k)).ok_or(EditError::EmptyPath)?;
    let root = root.as_object_mut().ok_or(EditError::RootNotObject)?;

    match self {
      JsonEdit::EnsureObject { position, .. } => {
        let parent = descend_creating(root, parents)?;
        match parent.get(key) {
          Some(Value::Object(_)) => Ok(EditOutcome::Unchanged),
          Some(_) => Err(EditError::NotAnObject {
            path: self.path_display(),
          }),
          None => {
            insert_at(parent, key.clone(), Value::Object(Map::new()), position);
            Ok(EditOutcome::Changed)
          }
        }
      }
      JsonEdit::Set { value, position, .. } => {
        let parent = descend_creating(root, parents)?;
        match parent.get_mut(key) {
          Some(current) if current == value => Ok(EditOutcome::Unchanged),
          Some(current) => {
            *current = value.clone();
            Ok(EditOutcome::Changed)
          }
          None => {
            insert_at(parent, key.clone(), value.clone(), position);
            Ok(EditOutcome::Changed)
          }
        }
      }
      JsonEdit::Remove { only_if, .. } => {
        let Some(parent) = descend_existing(root, parents)? else {
          return Ok(EditOutcome::Unchanged);
        };
        let matches = match (parent.get(key), only_if) {
          (None, _) => false,
          (Some(current), Some(expected)) => current == expected,
          (Some(_), None) => true,
        };
        if !matches {
          return Ok(EditOutcome::Unchanged);
        }
        parent.shift_remove(key);
        Ok(EditOutcome::Changed)
      }
    }
  }
}

/// Paths touched by an edit list, split by outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSummary {
  pub changed: Vec<String>,
  pub unchanged: Vec<String>,
}

impl EditSummary {
  pub fn has_changes(&self) -> bool {
    !self.changed.is_empty()
  }
}

/// Apply edits in order, stopping at the first unreachable target.
pub fn apply_edits(root: &mut Value, edits: &[JsonEdit]) -> Result<EditSummary, EditError> {
  let mut summary = EditSummary::default();
  for edit in edits {
    match edit.apply(root)? {
      EditOutcome::Changed => summary.changed.push(edit.path_display()),
      EditOutcome::Unchanged => summary.unchanged.push(edit.path_display()),
    }
  }
  Ok(summary)
}

fn descend_creating<'a>(
  mut map: &'a mut Map<String, Value>,
  parents: &[String],
) -> Result<&'a mut Map<String, Value>, EditError> {
  for (depth, key) in parents.iter().enumerate() {
    let entry = map.entry(key.clone()).or_insert_with(|| Value::Object(Map::new()));
    map = entry.as_object_mut().ok_or_else(|| EditError::NotAnObject {
      path: parents[..=depth].join("."),
    })?;
  }
  Ok(map)
}

fn descend_existing<'a>(
  mut map: &'a mut Map<String, Value>,
  parents: &[String],
) -> Result<Option<&'a mut Map<String, Value>>, EditError> {
  for (depth, key) in parents.iter().enumerate() {
    let Some(entry) = map.get_mut(key) else {
      return Ok(None);
    };
    map = entry.as_object_mut().ok_or_else(|| EditError::NotAnObject {
      path: parents[..=depth].join("."),
    })?;
  }
  Ok(Some(map))
}

fn insert_at(map: &mut Map<String, Value>, key: String, value: Value, position: &Position) {
  match position {
    Position::Last => {
      map.insert(key, value);
    }
    Position::First => {
      let rest = std::mem::take(map);
      map.insert(key, value);
      map.extend(rest);
    }
    Position::After(sibling) => {
      if !map.contains_key(sibling) {
        map.insert(key, value);
        return;
      }
      let rest = std::mem::take(map);
      let mut pending = Some((key, value));
      for (k, v) in rest {
        let hit = k == *sibling;
        map.insert(k, v);
        if hit {
          if let Some((key, value)) = pending.take() {
            map.insert(key, value);
          }
        }
      }
    }
  }
}
