//! # hmmer_domains
//!
//! Extract domain hits from `hmmscan` (HMMER3) plain-text reports and reduce
//! them to a non-overlapping set per query sequence.
//!
//! The pipeline has two stages:
//!
//! 1. **Parsing** ([`parse_report`]). A single forward pass classifies every
//!    line ([`LineClassifier`]), builds one [`Query`] per `Query:` header with
//!    its [`DomainHit`]s, and attributes the per-domain alignment rows to those
//!    hits *by position*, keeping only the lowest i-Evalue alignment per model.
//! 2. **Selection** ([`select_all`]). For each query the aligned hits are tried
//!    longest first; a hit is kept if it does not overlap anything kept so far
//!    (outside the current span, or strictly inside a gap between two kept
//!    hits).
//!
//! Hits listed below the report's inclusion threshold are either dropped or
//! kept with a marker appended to their name, see [`ThresholdPolicy`].
//!
//! ### Example
//! ```
//! use hmmer_domains::{parse_report, select_all, write_selection, ParseOptions};
//! let text = "\
//! Query:       seq1  [L=300]
//!     1.3e-40  137.2   0.1    2.1e-40  136.5   0.1    1.3  1  Pkinase  Protein kinase domain
//!    1 !  136.5   0.1   1.1e-43   2.1e-40       1     260 []      20     250 ..      20     251 .. 0.95
//! ";
//! let report = parse_report(text.lines(), &ParseOptions::default()).unwrap();
//! let selection = select_all(&report);
//! let mut out = Vec::new();
//! write_selection(&mut out, &report, &selection, b',').unwrap();
//! assert!(String::from_utf8(out).unwrap().ends_with("seq1,Protein kinase domain,Pkinase,1.3e-40,1,1,260,20,250,230\n"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod align;
pub mod classify;
pub mod common;
pub mod export;
pub mod overlap;
pub mod parser;
pub mod report;

pub use align::{AlignmentCursor, AlignmentRow};
pub use classify::{HitSummary, LineClassifier, LineKind, INCLUSION_THRESHOLD};
pub use common::{HmmerError, ParseOptions, ThresholdPolicy};
pub use export::{format_float, write_hits, write_selection, HEADER};
pub use overlap::{candidates, select_all, select_intervals, select_query, Candidate, Selection};
pub use parser::{parse_report, ParserContext, ReportBuilder, ScanState};
pub use report::{Alignment, DomainHit, Query, Report};

/// Parse `text` and run the overlap selection in one go.
pub fn parse_and_select(text: &str, options: &ParseOptions) -> Result<(Report, Selection), HmmerError> {
    let report = parse_report(text.lines(), options)?;
    let selection = select_all(&report);
    Ok((report, selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let (report, selection) = parse_and_select("", &ParseOptions::default()).unwrap();
        assert!(report.is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn query_without_hits_has_no_selection() {
        let (report, selection) = parse_and_select("Query:  lonely  [L=10]\n", &ParseOptions::default()).unwrap();
        assert_eq!(report.len(), 1);
        assert!(selection.get("lonely").is_none());
    }
}
