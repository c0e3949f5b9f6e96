//! CLI for `hmmdom select` (best alignment per domain, then non-overlapping domains).
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use hmmer_domains::*;

use crate::input::InputArgs;

#[derive(Debug, Args)]
pub struct SelectCmd {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output table.
    #[arg(long, default_value="domains.csv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: SelectCmd) -> Result<()> {
    let delimiter = cmd.input.delimiter()?;
    let report = cmd.input.parse()?;
    let selection = select_all(&report);

    let f = File::create(&cmd.outfile).with_context(|| format!("create {}", cmd.outfile.display()))?;
    let rows = write_selection(BufWriter::new(f), &report, &selection, delimiter)
        .with_context(|| format!("write {}", cmd.outfile.display()))?;
    info!("Wrote {} domains for {} queries to {}", rows, selection.len(), cmd.outfile.display());
    Ok(())
}
