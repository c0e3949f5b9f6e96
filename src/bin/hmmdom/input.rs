//! Input and parsing flags shared by the subcommands.
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use hmmer_domains::*;

#[derive(Debug, Args)]
pub struct InputArgs {
    /// hmmscan text report. If omitted, reads the report from stdin.
    #[arg(long, value_name="FILE")]
    pub hmmer: Option<PathBuf>,
    /// Keep hits listed below the inclusion threshold, marking their names.
    #[arg(long, default_value_t=false)]
    pub keep_below_threshold: bool,
    /// Character appended to kept below-threshold domain names.
    #[arg(long, default_value_t='!')]
    pub marker: char,
    /// Output field delimiter.
    #[arg(long, default_value_t=',')]
    pub delimiter: char,
}

impl InputArgs {
    pub fn options(&self) -> ParseOptions {
        let below_threshold = if self.keep_below_threshold { ThresholdPolicy::Keep } else { ThresholdPolicy::Drop };
        ParseOptions { below_threshold, marker: self.marker }
    }

    pub fn delimiter(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| anyhow::anyhow!("delimiter must be a single ASCII character: {:?}", self.delimiter))
    }

    /// Read the whole report from the file or stdin.
    pub fn read(&self) -> Result<String> {
        let mut s = String::new();
        match &self.hmmer {
            Some(p) => {
                File::open(p).with_context(|| format!("open hmmer report: {}", p.display()))?
                    .read_to_string(&mut s)
                    .with_context(|| format!("read hmmer report: {}", p.display()))?;
            }
            None => {
                io::stdin().read_to_string(&mut s).context("read hmmer report from stdin")?;
            }
        }
        Ok(s)
    }

    /// Read and parse the report.
    pub fn parse(&self) -> Result<Report> {
        let text = self.read()?;
        let report = parse_report(text.lines(), &self.options())?;
        info!("Parsed {} queries", report.len());
        Ok(report)
    }
}
