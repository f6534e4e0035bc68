//! Scaffold command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{OUTPUT_FILES, TestEnv, assert_no_output_files, snapshot};

#[test]
#[serial]
fn scaffolds_an_empty_directory() {
  let env = TestEnv::new().with_empty_project();

  env
    .tsinit_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Scaffolded"))
    .stdout(predicate::str::contains("npm run dev"))
    .stdout(predicate::str::contains("comments from `tsc --init` were dropped"));

  for file in OUTPUT_FILES {
    assert!(!env.read_file(file).trim().is_empty(), "{file} is empty");
  }

  let manifest = env.read_json("package.json");
  assert_eq!(manifest["type"], "module");
  assert_eq!(manifest["main"], "dist/index.js");
  let scripts: Vec<&str> = manifest["scripts"].as_object().unwrap().keys().map(String::as_str).collect();
  assert_eq!(scripts, ["build", "start", "dev", "lint"]);
  assert!(manifest["devDependencies"]["@tsconfig/node22"].is_string());
  assert!(manifest["devDependencies"]["eslint-config-prettier"].is_string());

  let config = env.read_json("tsconfig.json");
  assert_eq!(config["extends"], "@tsconfig/node22/tsconfig.json");
  assert_eq!(config["compilerOptions"]["outDir"], "./dist");
  assert!(config["compilerOptions"].get("target").is_none());
  assert_eq!(config["include"], serde_json::json!(["src"]));

  assert_eq!(env.read_file(".nvmrc"), "v22.4.0\n");
}

#[test]
#[serial]
fn creates_a_missing_project_directory() {
  let env = TestEnv::new();

  env.tsinit_cmd().assert().success();

  assert!(env.project.join("src").join("index.ts").is_file());
}

#[test]
#[serial]
fn invokes_tools_in_order() {
  let env = TestEnv::new().with_empty_project();

  env.tsinit_cmd().assert().success();

  assert_eq!(
    env.calls(),
    [
      "npm init -y",
      "npm install --save-dev typescript tsx @types/node @tsconfig/node22",
      "npx tsc --init",
      "npm install --save-dev prettier",
      "npm install --save-dev eslint @eslint/js",
      "npm install --save-dev typescript-eslint eslint-config-prettier",
    ]
  );
}

#[test]
#[serial]
fn runtime_mismatch_fails_without_writing() {
  let env = TestEnv::new().with_empty_project();

  env
    .tsinit_cmd()
    .env("FAKE_NODE_VERSION", "v20.11.1")
    .assert()
    .failure()
    .stderr(predicate::str::contains("major version 22 is required"));

  assert!(env.project_entries().is_empty());
  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn major_can_be_set_by_flag() {
  let env = TestEnv::new().with_empty_project();

  env
    .tsinit_cmd()
    .args(["--node-major", "20"])
    .env("FAKE_NODE_VERSION", "v20.11.1")
    .assert()
    .success();

  assert_eq!(env.read_json("tsconfig.json")["extends"], "@tsconfig/node20/tsconfig.json");
  assert_eq!(env.read_file(".nvmrc"), "v20.11.1\n");
}

#[test]
#[serial]
fn major_can_be_set_in_settings() {
  let env = TestEnv::new().with_empty_project();
  env.write_settings(r#"{ "node_major": 24 }"#);

  env
    .tsinit_cmd()
    .env("FAKE_NODE_VERSION", "v24.0.1")
    .assert()
    .success();

  assert!(env.read_json("package.json")["devDependencies"]["@tsconfig/node24"].is_string());
}

#[test]
#[serial]
fn declining_leaves_a_non_empty_directory_alone() {
  let env = TestEnv::new();
  env.write_file("README.md", "# app\n");

  env
    .tsinit_cmd()
    .write_stdin("no\n")
    .assert()
    .success()
    .stdout(predicate::str::contains("Cancelled"))
    .stderr(predicate::str::contains("is not empty"));

  assert_eq!(env.project_entries(), ["README.md"]);
  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn closed_stdin_declines() {
  let env = TestEnv::new();
  env.write_file("README.md", "# app\n");

  env.tsinit_cmd().write_stdin("").assert().success();

  assert_no_output_files(&env.project);
}

#[test]
#[serial]
fn confirmation_is_case_insensitive() {
  let env = TestEnv::new();
  env.write_file("README.md", "# app\n");

  env.tsinit_cmd().write_stdin("YES\n").assert().success();

  assert!(env.project.join("package.json").is_file());
  assert_eq!(env.read_file("README.md"), "# app\n");
}

#[test]
#[serial]
fn yes_flag_skips_the_prompt() {
  let env = TestEnv::new();
  env.write_file("README.md", "# app\n");

  env.tsinit_cmd().arg("--yes").assert().success();

  assert!(env.project.join("tsconfig.json").is_file());
}

#[test]
#[serial]
fn install_failure_is_fatal() {
  let env = TestEnv::new().with_empty_project();

  env
    .tsinit_cmd()
    .env("FAKE_NPM_FAIL", "prettier")
    .assert()
    .failure()
    .stderr(predicate::str::contains("install-formatter"))
    .stderr(predicate::str::contains("npm install --save-dev prettier"))
    .stderr(predicate::str::contains("npm ERR! 404"));

  assert!(env.project.join("tsconfig.json").is_file());
  assert!(!env.project.join(".prettierrc").exists());
  assert_eq!(env.calls().last().unwrap(), "npm install --save-dev prettier");
}

#[test]
#[serial]
fn failure_cause_is_reported_once() {
  let env = TestEnv::new().with_empty_project();

  let output = env
    .tsinit_cmd()
    .env("FAKE_NPM_FAIL", "typescript")
    .output()
    .unwrap();
  assert!(!output.status.success());

  let stderr = String::from_utf8(output.stderr).unwrap();
  assert_eq!(stderr.matches("npm ERR!").count(), 1, "{stderr}");
  assert_eq!(stderr.matches("failed to install typescript dependencies").count(), 1, "{stderr}");
  assert!(
    stderr.contains("step 'install-typescript' failed: failed to install typescript dependencies: command failed"),
    "{stderr}"
  );
  assert!(!stderr.contains("WARN"), "{stderr}");
}

#[test]
#[serial]
fn dry_run_writes_nothing() {
  let env = TestEnv::new().with_empty_project();

  env
    .tsinit_cmd()
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains("14 of 14 step(s) would run"));

  assert!(env.project_entries().is_empty());
  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn second_run_is_idempotent() {
  let env = TestEnv::new().with_empty_project();
  env.tsinit_cmd().assert().success();
  let before = snapshot(&env);
  let first_calls = env.calls().len();

  env
    .tsinit_cmd()
    .arg("--yes")
    .assert()
    .success()
    .stdout(predicate::str::contains("already up to date"))
    .stdout(predicate::str::contains("= Pin runtime version in .nvmrc (already done)"))
    .stdout(predicate::str::contains("comments from").not());

  assert_eq!(snapshot(&env), before);
  assert_eq!(env.calls().len(), first_calls);
}

#[test]
#[serial]
fn json_output_reports_every_step() {
  let env = TestEnv::new().with_empty_project();

  let output = env.tsinit_cmd().args(["--format", "json"]).output().unwrap();
  assert!(output.status.success());

  let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let steps = result["steps"].as_array().unwrap();
  assert_eq!(steps.len(), 14);
  assert_eq!(steps[0]["step"], "write-version-pin");
  assert!(steps.iter().all(|s| s["status"] == "applied"));
}
