//! Edits applied to the package manifest (`package.json`).

use serde_json::{Value, json};

use crate::json::JsonEdit;

/// Test script written by `npm init -y`.
pub const NPM_TEST_PLACEHOLDER: &str = "echo \"Error: no test specified\" && exit 1";

/// Scripts every scaffolded project gets, in insertion order.
pub const SCRIPTS: [(&str, &str); 4] = [
  ("build", "tsc"),
  ("start", "node dist/index.js"),
  ("dev", "tsx watch src/index.ts"),
  ("lint", "eslint ."),
];

/// Ordered edits turning a freshly generated manifest into an ESM TypeScript project.
///
/// The `scripts` object is ensured before individual scripts are set.
pub fn manifest_edits() -> Vec<JsonEdit> {
  let mut edits = vec![
    JsonEdit::set_after(&["type"], json!("module"), "main"),
    JsonEdit::set(&["main"], json!("dist/index.js")),
    JsonEdit::ensure_object_after(&["scripts"], "type"),
    JsonEdit::remove_if(&["scripts", "test"], json!(NPM_TEST_PLACEHOLDER)),
  ];
  edits.extend(
    SCRIPTS
      .iter()
      .map(|&(name, command)| JsonEdit::set(&["scripts", name], json!(command))),
  );
  edits
}

/// Packages from `wanted` that are not listed under `devDependencies`.
pub fn missing_dev_dependencies<'a>(manifest: &Value, wanted: &'a [String]) -> Vec<&'a str> {
  let installed = manifest.get("devDependencies").and_then(Value::as_object);
  wanted
    .iter()
    .map(String::as_str)
    .filter(|name| installed.is_none_or(|deps| !deps.contains_key(*name)))
    .collect()
}
