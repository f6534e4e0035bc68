//! Edits applied to the compiler configuration (`tsconfig.json`).
//!
//! `tsc --init` emits most options commented out. Once parsed, a disabled
//! option is simply an absent key: enabling means setting it and disabling
//! means removing it.

use serde_json::{Value, json};

use crate::json::JsonEdit;

/// Options that the recommended base config already provides, or that
/// newer `tsc --init` templates set in ways that break a Node project.
pub const INHERITED_OPTIONS: [&str; 4] = ["target", "module", "types", "jsx"];

/// Value of the `extends` field for a recommended-config package.
pub fn extends_target(base_package: &str) -> String {
  format!("{}/tsconfig.json", base_package)
}

/// Ordered edits for a generated `tsconfig.json`.
pub fn compiler_config_edits(base_package: &str) -> Vec<JsonEdit> {
  let mut edits = vec![
    JsonEdit::set_first(&["extends"], json!(extends_target(base_package))),
    JsonEdit::ensure_object(&["compilerOptions"]),
    JsonEdit::set(&["compilerOptions", "rootDir"], json!("./src")),
    JsonEdit::set(&["compilerOptions", "outDir"], json!("./dist")),
    JsonEdit::set(&["compilerOptions", "sourceMap"], json!(true)),
  ];
  edits.extend(
    INHERITED_OPTIONS
      .iter()
      .map(|&option| JsonEdit::remove(&["compilerOptions", option])),
  );
  edits.push(JsonEdit::set(&["include"], json!(["src"])));
  edits
}

/// The `extends` value of a parsed compiler config, if any.
pub fn extends_of(config: &Value) -> Option<&str> {
  config.get("extends").and_then(Value::as_str)
}
