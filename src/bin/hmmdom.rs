//! Command-line interface for the `hmmer_domains` crate.
//!
//! Subcommands are implemented in separate files (modules) under `src/bin/hmmdom/`:
//! - `select_cmd.rs`
//! - `hits_cmd.rs`
//!
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, Level};

#[derive(Debug, Parser)]
#[command(name="hmmdom", version=env!("CARGO_PKG_VERSION"), about="Best alignments and non-overlapping domains from hmmscan reports", disable_help_subcommand=true)]
struct Cli {
    /// Log debug messages (discarded hits and blocks).
    #[arg(long, short='v', global=true, conflicts_with="quiet")]
    verbose: bool,
    /// Only log warnings and errors.
    #[arg(long, short='q', global=true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Select non-overlapping domains per query and write them as CSV.
    Select(select_cmd::SelectCmd),
    /// Write every hit with its best alignment, before overlap selection.
    Hits(hits_cmd::HitsCmd),
}

#[path = "hmmdom/input.rs"] mod input;
#[path = "hmmdom/select_cmd.rs"] mod select_cmd;
#[path = "hmmdom/hits_cmd.rs"] mod hits_cmd;

fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    let level = if cli.verbose { Level::Debug } else if cli.quiet { Level::Warn } else { Level::Info };
    simple_logger::init_with_level(level)?;

    match cli.command {
        Command::Select(cmd) => select_cmd::run(cmd)?,
        Command::Hits(cmd) => hits_cmd::run(cmd)?,
    }

    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
