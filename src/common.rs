//! Shared pieces used across the pipeline: the crate error type and the
//! parsing options that decide what happens to hits reported below the
//! inclusion threshold.
//!
//! ## Threshold policy
//! `hmmscan` prints a `------ inclusion threshold ------` separator inside the
//! per-query hit list. Hits after it are reported but not considered
//! significant. [`ThresholdPolicy::Drop`] removes them from every later stage;
//! [`ThresholdPolicy::Keep`] retains them with [`ParseOptions::marker`]
//! appended to the domain name so they remain recognisable in the output.
//!
//! ## Examples
//! ```rust
//! use hmmer_domains::{ParseOptions, ThresholdPolicy};
//! let opts = ParseOptions { below_threshold: ThresholdPolicy::Keep, ..Default::default() };
//! assert_eq!(opts.marker, '!');
//! ```
//!

/// Errors that can be returned by the library.
#[derive(thiserror::Error, Debug)]
pub enum HmmerError {
    /// Returned if one of the line patterns fails to compile.
    #[error("invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
    /// Returned when a table row cannot be serialized.
    #[error("failed to write table: {0}")]
    Csv(#[from] csv::Error),
    /// Returned when the output sink cannot be flushed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with domain hits listed after the inclusion threshold marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThresholdPolicy {
    /// Record the hit with the marker character appended to its name.
    Keep,
    /// Discard the hit; its alignment blocks are never attributed.
    #[default]
    Drop,
}

/// Options consumed by the record builder.
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Handling of hits below the inclusion threshold.
    pub below_threshold: ThresholdPolicy,
    /// Suffix appended to kept below-threshold domain names.
    pub marker: char,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { below_threshold: ThresholdPolicy::Drop, marker: '!' }
    }
}

impl ParseOptions {
    /// Options that keep below-threshold hits with the default marker.
    pub fn keep() -> Self {
        Self { below_threshold: ThresholdPolicy::Keep, ..Self::default() }
    }
}
