//! The scaffolding pipeline.
//!
//! Scaffolding is an ordered list of [`Step`]s. Before a step runs, its
//! target state is checked; a step whose target state already holds is
//! skipped. Re-running the pipeline against a scaffolded directory therefore
//! converges without invoking the package manager again.
//!
//! The first failing step aborts the run. Nothing is rolled back.

mod steps;

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Settings;
use crate::emit::EmitError;
use crate::execute::CommandRunner;
use crate::init::InitError;
use crate::install::InstallError;
use crate::json::DocumentError;
use crate::preflight::{RuntimeVersion, Toolchain};

pub use steps::{PIPELINE, Step};

/// Error raised by an individual step.
#[derive(Debug, Error)]
pub enum StepError {
  #[error(transparent)]
  Init(#[from] InitError),

  #[error(transparent)]
  Install(#[from] InstallError),

  #[error(transparent)]
  Document(#[from] DocumentError),

  #[error(transparent)]
  Emit(#[from] EmitError),
}

#[derive(Debug, Error)]
pub enum ScaffoldError {
  #[error("failed to create directory {}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("step '{step}' failed")]
  Step {
    step: Step,
    #[source]
    source: StepError,
  },
}

/// Inputs to the pipeline, normally produced by preflight.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
  /// Project root; created if missing.
  pub dir: PathBuf,
  pub settings: Settings,
  pub toolchain: Toolchain,
  pub runtime: RuntimeVersion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
  /// The step ran.
  Applied,
  /// The step's target state already held.
  Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
  pub step: Step,
  pub status: StepStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScaffoldResult {
  pub dir: PathBuf,
  pub steps: Vec<StepReport>,
}

impl ScaffoldResult {
  pub fn applied_count(&self) -> usize {
    self.count(StepStatus::Applied)
  }

  pub fn skipped_count(&self) -> usize {
    self.count(StepStatus::Skipped)
  }

  fn count(&self, status: StepStatus) -> usize {
    self.steps.iter().filter(|report| report.status == status).count()
  }
}

/// A step as seen by a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
  pub step: Step,
  pub satisfied: bool,
}

/// Evaluate every step's target state without changing anything.
///
/// Steps are judged against the directory as it is now, so on a fresh
/// directory every step is pending.
pub fn plan(options: &ScaffoldOptions) -> Result<Vec<PlannedStep>, ScaffoldError> {
  PIPELINE
    .iter()
    .map(|&step| {
      let satisfied = step
        .is_satisfied(options)
        .map_err(|source| ScaffoldError::Step { step, source })?;
      Ok(PlannedStep { step, satisfied })
    })
    .collect()
}

/// Run the pipeline.
pub async fn scaffold<R: CommandRunner>(runner: &R, options: &ScaffoldOptions) -> Result<ScaffoldResult, ScaffoldError> {
  fs::create_dir_all(&options.dir).map_err(|source| ScaffoldError::CreateDir {
    path: options.dir.clone(),
    source,
  })?;

  let mut reports = Vec::with_capacity(PIPELINE.len());
  for step in PIPELINE {
    let satisfied = step
      .is_satisfied(options)
      .map_err(|source| ScaffoldError::Step { step, source })?;

    if satisfied {
      info!(step = %step, "target state already satisfied, skipping");
      reports.push(StepReport {
        step,
        status: StepStatus::Skipped,
        detail: None,
      });
      continue;
    }

    info!(step = %step, "running step");
    let detail = match step.execute(runner, options).await {
      Ok(detail) => detail,
      Err(source) => {
        debug!(step = %step, "step failed, aborting");
        return Err(ScaffoldError::Step { step, source });
      }
    };
    reports.push(StepReport {
      step,
      status: StepStatus::Applied,
      detail,
    });
  }

  Ok(ScaffoldResult {
    dir: options.dir.clone(),
    steps: reports,
  })
}
