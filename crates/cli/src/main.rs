use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use filedrop_core::constants::{DEFAULT_DATA_DIR, ENV_DATA_DIR};
use filedrop_core::{CoreConfig, DropService};

#[derive(Parser)]
#[command(name = "filedrop")]
#[command(about = "FileDrop storage administration CLI")]
struct Cli {
    /// Storage root holding one directory per identifier
    #[arg(long, global = true, env = ENV_DATA_DIR, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a new identifier and create its empty location
    InitUuid,
    /// Store a local file as the archive for an identifier
    Upload {
        /// Identifier to store under
        uuid: String,
        /// File to read
        path: PathBuf,
    },
    /// Write the archive for an identifier to a local file
    Download {
        /// Identifier to read
        uuid: String,
        /// File to write
        path: PathBuf,
    },
    /// Report whether an archive is stored for an identifier
    Exists {
        /// Identifier to check
        uuid: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli, &mut std::io::stdout())
}

fn run(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        writeln!(out, "Use 'filedrop --help' for commands")?;
        return Ok(());
    };

    let cfg = CoreConfig::from_env_values(
        None,
        Some(cli.data_dir.to_string_lossy().into_owned()),
        None,
        None,
    )?;
    let service = DropService::filesystem(&cfg)?;
    tracing::debug!(data_dir = %cfg.data_dir().display(), "using data directory");

    match command {
        Commands::InitUuid => {
            let id = service.issue()?;
            writeln!(out, "{}", id)?;
        }
        Commands::Upload { uuid, path } => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
            tracing::info!(path = %path.display(), size = bytes.len(), "uploading local file");
            service.store(&uuid, &bytes)?;
            writeln!(out, "Stored {} bytes for {}", bytes.len(), uuid)?;
        }
        Commands::Download { uuid, path } => {
            let bytes = service.read(&uuid)?;
            tracing::info!(id = %uuid, path = %path.display(), "writing archive to local file");
            std::fs::write(&path, &bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            writeln!(out, "Wrote {} bytes to {}", bytes.len(), path.display())?;
        }
        Commands::Exists { uuid } => {
            let found = service.exists(&uuid)?;
            writeln!(out, "{}", if found { "yes" } else { "no" })?;
        }
    }

    Ok(())
}
