//! zipsh entry point.
//!
//! Usage:
//!   zipsh                          # Interactive shell over config.json's archive
//!   zipsh -c "ls -l" -c "cd dir1"  # Run commands and exit
//!   zipsh --script tour.txt        # Run a command file
//!   zipsh pack <dir> <archive>     # Build an archive from a directory

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use zipsh::{repl, ArchiveFilesystem, ArchivePacker, CommandInterpreter, JsonlJournal, ShellConfig};

#[derive(Parser, Debug)]
#[command(name = "zipsh", version, about = "Shell over a zip-backed virtual filesystem")]
struct Cli {
    /// JSON config naming the archive, hostname and journal
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Use this archive instead of the one in the config
    #[arg(long)]
    archive: Option<PathBuf>,

    /// Run a command line and exit (repeatable)
    #[arg(short = 'c', value_name = "COMMAND", conflicts_with = "script")]
    commands: Vec<String>,

    /// Run commands from a file, one per line
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an archive from a local directory
    Pack {
        /// Directory whose files become archive entries
        source: PathBuf,
        /// Archive to create or replace
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never mix with command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::Pack { source, output }) = &cli.command {
        return pack(source, output);
    }

    let mut config = ShellConfig::load(&cli.config)?;
    if let Some(archive) = cli.archive {
        config.vfs_path = archive;
    }

    let mut vfs = ArchiveFilesystem::open(&config.vfs_path)
        .with_context(|| format!("Failed to open archive: {}", config.vfs_path.display()))?;
    let mut journal = JsonlJournal::new(&config.log_path);
    let mut shell = CommandInterpreter::new(&mut vfs, &mut journal);

    let stdout = io::stdout();
    if let Some(script) = &cli.script {
        let file = File::open(script)
            .with_context(|| format!("Failed to open script: {}", script.display()))?;
        repl::run_script(&mut shell, BufReader::new(file), &mut stdout.lock())?;
    } else if !cli.commands.is_empty() {
        repl::run_lines(&mut shell, &cli.commands, &mut stdout.lock())?;
    } else {
        repl::run_interactive(&mut shell, &config.hostname)?;
    }

    Ok(())
}

fn pack(source: &Path, output: &Path) -> Result<()> {
    let mut packer = ArchivePacker::new();
    let added = packer
        .add_dir(source)
        .with_context(|| format!("Failed to pack {}", source.display()))?;
    packer.write_to_file(output)?;

    info!(source = %source.display(), output = %output.display(), added, "pack complete");
    println!("Packed {} files into {}", added, output.display());
    Ok(())
}
