//! Implementation of the `tsinit` command.
//!
//! Runs preflight, asks before touching a non-empty directory, then either
//! prints the plan (`--dry-run`) or runs the scaffolding pipeline.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use tsinit_lib::config::Settings;
use tsinit_lib::execute::SystemRunner;
use tsinit_lib::preflight::{Toolchain, run_preflight};
use tsinit_lib::scaffold::{PlannedStep, ScaffoldOptions, ScaffoldResult, Step, StepStatus, plan, scaffold};

use crate::output::{
  OutputFormat, print_hint, print_info, print_json, print_pending, print_success, print_unchanged, print_warning,
};
use crate::prompts::confirm;

pub struct ScaffoldArgs {
  pub dir: PathBuf,
  pub yes: bool,
  pub dry_run: bool,
  pub node_major: Option<u64>,
  pub output: OutputFormat,
}

pub fn cmd_scaffold(args: ScaffoldArgs) -> Result<()> {
  let dir = absolute_dir(&args.dir)?;

  let mut settings = Settings::load().context("Failed to load settings")?;
  if let Some(major) = args.node_major {
    settings.node_major = major;
  }
  let toolchain = Toolchain::resolve(&settings)?;

  let runner = SystemRunner;
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;

  let report = rt
    .block_on(run_preflight(&runner, &toolchain, &settings, &dir))
    .context("Preflight failed")?;
  info!(runtime = %report.runtime.raw, dir = %dir.display(), "preflight passed");

  // A dry run writes nothing, so it never needs consent.
  if report.directory.needs_confirmation() && !args.dry_run {
    print_warning(&format!(
      "{} is not empty. Existing files may be overwritten.",
      dir.display()
    ));
    if !confirm("Scaffold into it anyway?", args.yes)? {
      if args.output.is_json() {
        print_json(&json!({ "dir": dir, "cancelled": true }))?;
      } else {
        print_info("Cancelled, nothing was written");
      }
      return Ok(());
    }
  }

  let options = ScaffoldOptions {
    dir,
    settings,
    toolchain,
    runtime: report.runtime,
  };

  if args.dry_run {
    let planned = plan(&options)?;
    if args.output.is_json() {
      print_json(&planned)?;
    } else {
      print_plan(&options.dir, &planned);
    }
    return Ok(());
  }

  let result = rt.block_on(scaffold(&runner, &options))?;
  if args.output.is_json() {
    print_json(&result)?;
  } else {
    print_result(&result);
  }
  Ok(())
}

/// Resolve `dir` against the working directory. It need not exist.
fn absolute_dir(dir: &Path) -> Result<PathBuf> {
  if dir.exists() {
    return dunce::canonicalize(dir).with_context(|| format!("Failed to resolve {}", dir.display()));
  }
  if dir.is_absolute() {
    return Ok(dir.to_path_buf());
  }
  let cwd = std::env::current_dir().context("Failed to read current directory")?;
  Ok(cwd.join(dir))
}

fn print_plan(dir: &Path, planned: &[PlannedStep]) {
  let pending = planned.iter().filter(|p| !p.satisfied).count();

  println!();
  print_info(&format!("Dry run for {} - no changes made", dir.display()));
  for entry in planned {
    if entry.satisfied {
      print_unchanged(&format!("{} (already done)", entry.step.description()));
    } else {
      print_pending(entry.step.description());
    }
  }
  println!();
  print_info(&format!("{} of {} step(s) would run", pending, planned.len()));
}

fn print_result(result: &ScaffoldResult) {
  println!();
  for report in &result.steps {
    match report.status {
      StepStatus::Applied => print_success(report.step.description()),
      StepStatus::Skipped => print_unchanged(&format!("{} (already done)", report.step.description())),
    }
  }

  let rewrote_config = result
    .steps
    .iter()
    .any(|report| report.step == Step::PatchCompilerConfig && report.status == StepStatus::Applied);
  if rewrote_config {
    print_info("tsconfig.json was rewritten as plain JSON; the comments from `tsc --init` were dropped");
  }

  println!();
  if result.applied_count() == 0 {
    print_info("Project is already up to date");
  } else {
    print_success(&format!(
      "Scaffolded {} ({} applied, {} skipped)",
      result.dir.display(),
      result.applied_count(),
      result.skipped_count()
    ));
  }

  println!();
  println!("Next steps:");
  print_hint(&format!("cd {}", result.dir.display()));
  print_hint("npm run dev");
}
