//! Individual pipeline steps: what each one does and how to tell it is done.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::{ScaffoldOptions, StepError};
use crate::consts::{COMPILER_CONFIG_FILE, MANIFEST_FILE};
use crate::emit::{EDITOR_SETTINGS, EXAMPLE_SOURCE, FORMATTER_CONFIG, IGNORE_RULES, LINTER_CONFIG, StaticFile};
use crate::execute::CommandRunner;
use crate::init::{generate_compiler_config, generate_manifest, version_pin_is_current, write_version_pin};
use crate::install::{DependencyGroup, install_group};
use crate::json::{DocumentError, JsonDocument, JsonEdit};
use crate::manifest::{manifest_edits, missing_dev_dependencies};
use crate::tsconfig::compiler_config_edits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
  WriteVersionPin,
  GenerateManifest,
  InstallTypescript,
  GenerateCompilerConfig,
  PatchCompilerConfig,
  PatchManifest,
  InstallFormatter,
  EmitFormatterConfig,
  InstallLinter,
  InstallLinterPlugin,
  EmitLinterConfig,
  EmitEditorSettings,
  EmitIgnoreRules,
  EmitExampleSource,
}

/// Steps in execution order.
///
/// The compiler config can only be generated once TypeScript is installed,
/// and each tool's config follows the install of that tool.
pub const PIPELINE: [Step; 14] = [
  Step::WriteVersionPin,
  Step::GenerateManifest,
  Step::InstallTypescript,
  Step::GenerateCompilerConfig,
  Step::PatchCompilerConfig,
  Step::PatchManifest,
  Step::InstallFormatter,
  Step::EmitFormatterConfig,
  Step::InstallLinter,
  Step::InstallLinterPlugin,
  Step::EmitLinterConfig,
  Step::EmitEditorSettings,
  Step::EmitIgnoreRules,
  Step::EmitExampleSource,
];

impl Step {
  pub fn id(self) -> &'static str {
    match self {
      Step::WriteVersionPin => "write-version-pin",
      Step::GenerateManifest => "generate-manifest",
      Step::InstallTypescript => "install-typescript",
      Step::GenerateCompilerConfig => "generate-compiler-config",
      Step::PatchCompilerConfig => "patch-compiler-config",
      Step::PatchManifest => "patch-manifest",
      Step::InstallFormatter => "install-formatter",
      Step::EmitFormatterConfig => "emit-formatter-config",
      Step::InstallLinter => "install-linter",
      Step::InstallLinterPlugin => "install-linter-plugin",
      Step::EmitLinterConfig => "emit-linter-config",
      Step::EmitEditorSettings => "emit-editor-settings",
      Step::EmitIgnoreRules => "emit-ignore-rules",
      Step::EmitExampleSource => "emit-example-source",
    }
  }

  /// One-line summary for terminal output.
  pub fn description(self) -> &'static str {
    match self {
      Step::WriteVersionPin => "Pin runtime version in .nvmrc",
      Step::GenerateManifest => "Generate package.json",
      Step::InstallTypescript => "Install TypeScript tooling",
      Step::GenerateCompilerConfig => "Generate tsconfig.json",
      Step::PatchCompilerConfig => "Configure tsconfig.json",
      Step::PatchManifest => "Configure package.json",
      Step::InstallFormatter => "Install formatter",
      Step::EmitFormatterConfig => "Write .prettierrc",
      Step::InstallLinter => "Install linter",
      Step::InstallLinterPlugin => "Install linter plugins",
      Step::EmitLinterConfig => "Write eslint.config.mjs",
      Step::EmitEditorSettings => "Write .vscode/settings.json",
      Step::EmitIgnoreRules => "Write .gitignore",
      Step::EmitExampleSource => "Write src/index.ts",
    }
  }

  pub fn static_file(self) -> Option<StaticFile> {
    match self {
      Step::EmitFormatterConfig => Some(FORMATTER_CONFIG),
      Step::EmitLinterConfig => Some(LINTER_CONFIG),
      Step::EmitEditorSettings => Some(EDITOR_SETTINGS),
      Step::EmitIgnoreRules => Some(IGNORE_RULES),
      Step::EmitExampleSource => Some(EXAMPLE_SOURCE),
      _ => None,
    }
  }

  pub fn dependency_group(self, options: &ScaffoldOptions) -> Option<DependencyGroup> {
    match self {
      Step::InstallTypescript => Some(DependencyGroup::typescript(&options.settings.tsconfig_base())),
      Step::InstallFormatter => Some(DependencyGroup::formatter()),
      Step::InstallLinter => Some(DependencyGroup::linter()),
      Step::InstallLinterPlugin => Some(DependencyGroup::linter_plugin()),
      _ => None,
    }
  }

  /// Whether the step's target state already holds in `options.dir`.
  pub fn is_satisfied(self, options: &ScaffoldOptions) -> Result<bool, StepError> {
    let dir = options.dir.as_path();

    if let Some(file) = self.static_file() {
      return Ok(file.is_current(dir));
    }
    if let Some(group) = self.dependency_group(options) {
      let Some(manifest) = load_if_present(&dir.join(MANIFEST_FILE), false)? else {
        return Ok(false);
      };
      return Ok(missing_dev_dependencies(manifest.value(), &group.packages).is_empty());
    }

    match self {
      Step::WriteVersionPin => Ok(version_pin_is_current(dir, &options.runtime.raw)),
      Step::GenerateManifest => Ok(dir.join(MANIFEST_FILE).is_file()),
      Step::GenerateCompilerConfig => Ok(dir.join(COMPILER_CONFIG_FILE).is_file()),
      Step::PatchCompilerConfig | Step::PatchManifest => {
        let Some((mut document, edits)) = self.document_edits(options)? else {
          return Ok(false);
        };
        Ok(!document.apply(&edits)?.has_changes())
      }
      _ => Ok(false),
    }
  }

  /// Perform the step. Returns a short detail for the report.
  pub async fn execute<R: CommandRunner>(
    self,
    runner: &R,
    options: &ScaffoldOptions,
  ) -> Result<Option<String>, StepError> {
    let dir = options.dir.as_path();
    let tools = &options.toolchain;

    if let Some(file) = self.static_file() {
      file.emit(dir)?;
      return Ok(Some(file.path.to_string()));
    }
    if let Some(group) = self.dependency_group(options) {
      install_group(runner, &tools.npm, dir, &group).await?;
      return Ok(Some(group.packages.join(" ")));
    }

    match self {
      Step::WriteVersionPin => {
        write_version_pin(dir, &options.runtime.raw)?;
        Ok(Some(options.runtime.raw.clone()))
      }
      Step::GenerateManifest => {
        generate_manifest(runner, &tools.npm, dir).await?;
        Ok(None)
      }
      Step::GenerateCompilerConfig => {
        generate_compiler_config(runner, &tools.npx, dir).await?;
        Ok(None)
      }
      Step::PatchCompilerConfig | Step::PatchManifest => {
        let Some((mut document, edits)) = self.document_edits(options)? else {
          let file = if self == Step::PatchManifest { MANIFEST_FILE } else { COMPILER_CONFIG_FILE };
          return Err(StepError::Document(missing_document(&dir.join(file))));
        };
        let summary = document.apply(&edits)?;
        if summary.has_changes() {
          document.save()?;
          info!(path = %document.path().display(), changed = ?summary.changed, "patched document");
        }
        Ok(Some(summary.changed.join(", ")))
      }
      _ => Ok(None),
    }
  }

  /// The document a patch step edits, with its edit list.
  fn document_edits(self, options: &ScaffoldOptions) -> Result<Option<(JsonDocument, Vec<JsonEdit>)>, DocumentError> {
    let dir = options.dir.as_path();
    let (document, edits) = match self {
      Step::PatchCompilerConfig => (
        load_if_present(&dir.join(COMPILER_CONFIG_FILE), true)?,
        compiler_config_edits(&options.settings.tsconfig_base()),
      ),
      Step::PatchManifest => (load_if_present(&dir.join(MANIFEST_FILE), false)?, manifest_edits()),
      _ => return Ok(None),
    };
    Ok(document.map(|document| (document, edits)))
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

fn load_if_present(path: &Path, jsonc: bool) -> Result<Option<JsonDocument>, DocumentError> {
  if !path.is_file() {
    return Ok(None);
  }
  let document = if jsonc {
    JsonDocument::load_jsonc(path)?
  } else {
    JsonDocument::load(path)?
  };
  Ok(Some(document))
}

fn missing_document(path: &Path) -> DocumentError {
  DocumentError::Read {
    path: path.to_path_buf(),
    source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
  }
}
