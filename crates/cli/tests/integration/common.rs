//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Reports whatever version `FAKE_NODE_VERSION` holds.
const FAKE_NODE: &str = r#"#!/bin/sh
echo "${FAKE_NODE_VERSION:-v22.4.0}"
"#;

/// `init -y` writes a manifest; `install --save-dev` records the packages
/// as the first devDependencies entries. Fails when an argument equals
/// `FAKE_NPM_FAIL`.
const FAKE_NPM: &str = r#"#!/bin/sh
echo "npm $*" >> "$FAKE_LOG"
if [ -n "$FAKE_NPM_FAIL" ]; then
  for arg in "$@"; do
    if [ "$arg" = "$FAKE_NPM_FAIL" ]; then
      echo "npm ERR! 404 Not Found - $arg" >&2
      exit 1
    fi
  done
fi
case "$1" in
  init)
    cat > package.json <<'JSON'
{
  "name": "app",
  "version": "1.0.0",
  "description": "",
  "main": "index.js",
  "scripts": {
    "test": "echo \"Error: no test specified\" && exit 1"
  },
  "keywords": [],
  "author": "",
  "license": "ISC"
}
JSON
    ;;
  install)
    shift 2
    entries=""
    for pkg in "$@"; do
      entries="$entries \"$pkg\": \"^1.0.0\","
    done
    if grep -q '"devDependencies"' package.json; then
      sed -i.bak "s|\"devDependencies\": {|\"devDependencies\": {$entries|" package.json
    else
      sed -i.bak "1s|{|{ \"devDependencies\": {${entries%,} },|" package.json
    fi
    rm -f package.json.bak
    ;;
esac
"#;

/// `tsc --init` writes a commented compiler config.
const FAKE_NPX: &str = r#"#!/bin/sh
echo "npx $*" >> "$FAKE_LOG"
cat > tsconfig.json <<'JSON'
{
  "compilerOptions": {
    /* Language and Environment */
    "target": "es2016",                 /* Set the JavaScript language version. */
    // "jsx": "preserve",               /* Specify what JSX code is generated. */
    "module": "commonjs",               /* Specify what module code is generated. */
    // "rootDir": "./",
    // "outDir": "./",
    "esModuleInterop": true,
    "forceConsistentCasingInFileNames": true,
    "strict": true,
    "skipLibCheck": true,
  }
}
JSON
"#;

/// Files every successful run leaves in the project.
pub const OUTPUT_FILES: [&str; 8] = [
  ".nvmrc",
  "package.json",
  "tsconfig.json",
  ".prettierrc",
  "eslint.config.mjs",
  ".vscode/settings.json",
  ".gitignore",
  "src/index.ts",
];

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the fake tools, an
/// isolated config home and the project directory.
pub struct TestEnv {
  pub temp: TempDir,
  pub project: PathBuf,
  bin: PathBuf,
}

impl TestEnv {
  /// Fake tools are installed; the project directory does not exist yet.
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let bin = temp.path().join("bin");
    fs::create_dir_all(&bin).unwrap();
    for (name, script) in [("node", FAKE_NODE), ("npm", FAKE_NPM), ("npx", FAKE_NPX)] {
      let path = bin.join(name);
      fs::write(&path, script).unwrap();
      fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    let project = temp.path().join("app");
    Self { temp, project, bin }
  }

  /// Create the project directory, empty.
  pub fn with_empty_project(self) -> Self {
    fs::create_dir_all(&self.project).unwrap();
    self
  }

  /// Write a file relative to the project directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.project.join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    fs::read_to_string(self.project.join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  pub fn read_json(&self, relative_path: &str) -> serde_json::Value {
    serde_json::from_str(&self.read_file(relative_path)).unwrap()
  }

  /// Write the user settings file.
  pub fn write_settings(&self, content: &str) {
    let dir = self.config_home().join("tsinit");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.json"), content).unwrap();
  }

  /// Sorted entry names of the project directory.
  pub fn project_entries(&self) -> Vec<String> {
    let mut entries: Vec<String> = fs::read_dir(&self.project)
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    entries.sort();
    entries
  }

  /// Command lines the fake `npm` and `npx` received, in order.
  pub fn calls(&self) -> Vec<String> {
    match fs::read_to_string(self.log_path()) {
      Ok(log) => log.lines().map(str::to_string).collect(),
      Err(_) => Vec::new(),
    }
  }

  fn config_home(&self) -> PathBuf {
    self.temp.path().join("config")
  }

  fn log_path(&self) -> PathBuf {
    self.temp.path().join("calls.log")
  }

  fn tool(&self, name: &str) -> PathBuf {
    self.bin.join(name)
  }

  /// Get a pre-configured Command for the tsinit binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `TSINIT_NODE`, `TSINIT_NPM`, `TSINIT_NPX`: the fake tools
  /// - `XDG_CONFIG_HOME`: isolated settings directory
  /// - `FAKE_LOG`: where the fakes record their invocations
  pub fn tsinit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("tsinit");
    cmd.arg(&self.project);
    cmd.env("TSINIT_NODE", self.tool("node"));
    cmd.env("TSINIT_NPM", self.tool("npm"));
    cmd.env("TSINIT_NPX", self.tool("npx"));
    cmd.env("XDG_CONFIG_HOME", self.config_home());
    cmd.env("FAKE_LOG", self.log_path());
    cmd.env_remove("TSINIT_NODE_MAJOR");
    cmd.env_remove("FAKE_NODE_VERSION");
    cmd.env_remove("FAKE_NPM_FAIL");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

/// Snapshot of every output file, for byte-for-byte comparison.
pub fn snapshot(env: &TestEnv) -> Vec<(String, String)> {
  OUTPUT_FILES
    .iter()
    .map(|file| (file.to_string(), env.read_file(file)))
    .collect()
}

pub fn assert_no_output_files(project: &Path) {
  for file in OUTPUT_FILES {
    assert!(!project.join(file).exists(), "{file} was written");
  }
}
