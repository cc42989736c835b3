//! Binary entry point for labarchive.
//!
//! This binary provides the CLI around the archive pipelines: export the
//! dataset into a container, import a container back, and inspect a
//! container's content.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow CLI output in the main binary
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use labarchive::commands::archive::{cmd_export, cmd_import, cmd_inspect};
use labarchive::config::ArchiveConfig;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Labarchive - archive export/import for laboratory datasets.
#[derive(Parser)]
#[command(name = "labarchive")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Export the dataset and its attached files into an archive.
    Export {
        /// Path to the dataset document (JSON).
        #[arg(short, long)]
        data: PathBuf,

        /// Destination archive path.
        #[arg(short, long)]
        output: PathBuf,

        /// Root directory of the file store.
        #[arg(short, long)]
        files: Option<PathBuf>,
    },

    /// Import an archive: restore files and rebuild the dataset.
    Import {
        /// Path to the archive.
        #[arg(short, long)]
        archive: PathBuf,

        /// Destination path for the rebuilt dataset document (JSON).
        #[arg(short, long)]
        data: PathBuf,

        /// Root directory of the file store.
        #[arg(short, long)]
        files: Option<PathBuf>,

        /// Overwrite existing files instead of keeping them.
        #[arg(long)]
        overwrite: bool,

        /// Section where a malformed record aborts the import (repeatable).
        #[arg(long, value_name = "SECTION")]
        strict: Vec<String>,
    },

    /// List the sections and attached files of an archive.
    Inspect {
        /// Path to the archive.
        #[arg(short, long)]
        archive: PathBuf,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match ArchiveConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &ArchiveConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Export { data, output, files } => {
            cmd_export(config, &data, &output, files.as_deref()).context("export failed")?;
        },
        Commands::Import {
            archive,
            data,
            files,
            overwrite,
            strict,
        } => {
            cmd_import(
                config,
                &archive,
                &data,
                files.as_deref(),
                overwrite,
                &strict,
            )
            .context("import failed")?;
        },
        Commands::Inspect { archive } => {
            cmd_inspect(&archive).context("inspect failed")?;
        },
    }
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set; `--verbose` raises the default level otherwise.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "labarchive=debug"
    } else {
        "labarchive=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .init();
}
