use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use drydock_lib::consts::DEFAULT_CONFIG_FILE;
use tracing_subscriber::EnvFilter;

mod cmd;
mod output;

use crate::output::OutputFormat;

/// drydock - versioned deployments to a remote document store
#[derive(Parser)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Path to the project configuration file
  #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
  config: PathBuf,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Upload the built artifact as a new revision
  Deploy {
    /// Revision identifier (falls back to `revision` in the config)
    revision: Option<String>,

    /// Artifact file to upload instead of <dist_dir>/<file_pattern>
    #[arg(long)]
    artifact: Option<PathBuf>,
  },

  /// Mark an uploaded revision as the active one
  Activate {
    /// Revision identifier to activate
    revision: String,
  },

  /// List known revisions, most recent first
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the resolved deploy configuration
  Status {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Deploy { revision, artifact } => {
      cmd::cmd_deploy(&cli.config, revision.as_deref(), artifact.as_deref()).await
    }
    Commands::Activate { revision } => cmd::cmd_activate(&cli.config, &revision).await,
    Commands::List { output } => cmd::cmd_list(&cli.config, output).await,
    Commands::Status { output } => cmd::cmd_status(&cli.config, output),
  }
}
