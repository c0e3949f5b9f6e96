//! CLI for `hmmdom hits` (all hits with their best alignment, no overlap filtering).
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use hmmer_domains::*;

use crate::input::InputArgs;

#[derive(Debug, Args)]
pub struct HitsCmd {
    #[command(flatten)]
    pub input: InputArgs,
    /// Output table.
    #[arg(long, default_value="hits.csv")]
    pub outfile: PathBuf,
}

pub fn run(cmd: HitsCmd) -> Result<()> {
    let delimiter = cmd.input.delimiter()?;
    let report = cmd.input.parse()?;

    let f = File::create(&cmd.outfile).with_context(|| format!("create {}", cmd.outfile.display()))?;
    let rows = write_hits(BufWriter::new(f), &report, delimiter)
        .with_context(|| format!("write {}", cmd.outfile.display()))?;
    info!("Wrote {} hits to {}", rows, cmd.outfile.display());
    Ok(())
}
