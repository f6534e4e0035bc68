mod cmd;
mod output;
mod prompts;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cmd::{ScaffoldArgs, cmd_scaffold};
use output::{OutputFormat, print_error};

/// tsinit - scaffold a TypeScript/Node.js project
#[derive(Parser)]
#[command(name = "tsinit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project directory (created if missing)
  #[arg(default_value = ".")]
  dir: PathBuf,

  /// Proceed without asking when the directory is not empty
  #[arg(short, long)]
  yes: bool,

  /// Show which steps would run without changing anything
  #[arg(long)]
  dry_run: bool,

  /// Required runtime major version (overrides settings)
  #[arg(long, value_name = "MAJOR")]
  node_major: Option<u64>,

  /// Output format for the plan and the result
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = ScaffoldArgs {
    dir: cli.dir,
    yes: cli.yes,
    dry_run: cli.dry_run,
    node_major: cli.node_major,
    output: cli.format,
  };

  match cmd_scaffold(args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
