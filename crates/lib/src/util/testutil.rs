//! Test utilities for tsinit-lib.
//!
//! [`FakeRunner`] stands in for `node`, `npm` and `npx`: it records every
//! invocation and produces the files the real tools would.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::{Value, json};

use crate::execute::{CommandRunner, ExecuteError, Invocation};
use crate::preflight::Toolchain;

/// `package.json` as written by `npm init -y`.
pub const NPM_INIT_OUTPUT: &str = r#"{
  "name": "demo",
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
"#;

/// Abridged `tsconfig.json` as written by `tsc --init`.
pub const TSC_INIT_OUTPUT: &str = r#"{
  "compilerOptions": {
    /* Visit https://aka.ms/tsconfig to read more about this file */
    "target": "es2016",                                  /* Set the JavaScript language version. */
    "module": "commonjs",                                /* Specify what module code is generated. */
    // "rootDir": "./",                                  /* Specify the root folder within your source files. */
    // "outDir": "./",                                   /* Specify an output folder for all emitted files. */
    "esModuleInterop": true,                             /* Emit additional JavaScript to ease support for importing CommonJS modules. */
    "strict": true,                                      /* Enable all strict type-checking options. */
    "skipLibCheck": true                                 /* Skip type checking all .d.ts files. */
  }
}
"#;

pub struct FakeRunner {
  node_version: String,
  fail_on: Option<String>,
  calls: Mutex<Vec<String>>,
}

impl FakeRunner {
  pub fn new(node_version: &str) -> Self {
    Self {
      node_version: node_version.to_string(),
      fail_on: None,
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Fail every invocation whose command line starts with `prefix`.
  pub fn failing_on(mut self, prefix: &str) -> Self {
    self.fail_on = Some(prefix.to_string());
    self
  }

  /// Toolchain naming the bare tools, as the fake expects them.
  pub fn toolchain() -> Toolchain {
    Toolchain {
      node: PathBuf::from("node"),
      npm: PathBuf::from("npm"),
      npx: PathBuf::from("npx"),
    }
  }

  /// Command lines run so far, in order.
  pub fn calls(&self) -> Vec<String> {
    self.calls.lock().unwrap().clone()
  }

  fn respond(&self, invocation: &Invocation) -> Result<String, ExecuteError> {
    let cmd = invocation.to_string();
    self.calls.lock().unwrap().push(cmd.clone());

    if self.fail_on.as_deref().is_some_and(|prefix| cmd.starts_with(prefix)) {
      return Err(ExecuteError::CmdFailed {
        cmd,
        code: Some(1),
        stderr: "npm ERR! simulated failure".to_string(),
      });
    }

    let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
    match (invocation.program_name().as_str(), args.as_slice()) {
      ("node", ["--version"]) => Ok(self.node_version.clone()),
      ("npm", ["init", "-y"]) => {
        fs::write(invocation.cwd.join("package.json"), NPM_INIT_OUTPUT).unwrap();
        Ok(String::new())
      }
      ("npx", ["tsc", "--init"]) => {
        fs::write(invocation.cwd.join("tsconfig.json"), TSC_INIT_OUTPUT).unwrap();
        Ok(String::new())
      }
      ("npm", ["install", "--save-dev", packages @ ..]) => {
        let path = invocation.cwd.join("package.json");
        let mut manifest: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let deps = manifest
          .as_object_mut()
          .unwrap()
          .entry("devDependencies")
          .or_insert_with(|| json!({}));
        for package in packages {
          deps[*package] = json!("^1.0.0");
        }
        fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap() + "\n").unwrap();
        Ok(String::new())
      }
      _ => panic!("unexpected invocation: {cmd}"),
    }
  }
}

impl CommandRunner for FakeRunner {
  async fn run(&self, invocation: &Invocation) -> Result<String, ExecuteError> {
    self.respond(invocation)
  }
}
