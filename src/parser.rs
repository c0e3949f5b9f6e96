//! Record builder: one forward pass over a report that turns classified
//! lines into a [`Report`].
//!
//! Per-query working state (threshold flag, alignment cursor) lives in a
//! [`ParserContext`] that is rebuilt on every `Query:` header and threaded
//! through the loop.
//!
//! ### Example
//! ```rust
//! use hmmer_domains::{parse_report, ParseOptions};
//! let text = "\
//! Query:       seq1  [L=300]
//!     1.3e-40  137.2   0.1    2.1e-40  136.5   0.1    1.3  1  Pkinase  Protein kinase domain
//!    1 !  136.5   0.1   1.1e-43   2.1e-40       1     260 []      20     250 ..      20     251 .. 0.95
//! ";
//! let report = parse_report(text.lines(), &ParseOptions::default()).unwrap();
//! let hit = &report.query("seq1").unwrap().hits["Pkinase"];
//! assert_eq!(hit.alignment.as_ref().unwrap().length, 230);
//! ```
//!
use log::{debug, trace};

use crate::align::{AlignmentCursor, AlignmentRow};
use crate::classify::{HitSummary, LineClassifier, LineKind};
use crate::common::{HmmerError, ParseOptions, ThresholdPolicy};
use crate::report::{DomainHit, Query, Report};

/// Position of the builder relative to the inclusion threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanState {
    /// Hits are significant.
    #[default]
    InQuery,
    /// The inclusion threshold separator has been seen.
    BelowThreshold,
}

/// Working state of the query currently being read.
#[derive(Clone, Debug)]
pub struct ParserContext {
    /// Key of the query in the report.
    pub query: String,
    /// Inclusion threshold state; reset by every `Query:` header.
    pub state: ScanState,
    /// Position of the next alignment block in the hit order.
    pub cursor: AlignmentCursor,
}

impl ParserContext {
    fn new(query: &str) -> Self {
        Self { query: query.to_string(), state: ScanState::InQuery, cursor: AlignmentCursor::new() }
    }
}

/// Streaming report builder.
#[derive(Debug)]
pub struct ReportBuilder {
    classifier: LineClassifier,
    options: ParseOptions,
    report: Report,
    context: Option<ParserContext>,
}

impl ReportBuilder {
    pub fn new(options: ParseOptions) -> Result<Self, HmmerError> {
        Ok(Self { classifier: LineClassifier::new()?, options, report: Report::default(), context: None })
    }

    /// State of the current query, if a header has been seen.
    pub fn context(&self) -> Option<&ParserContext> {
        self.context.as_ref()
    }

    /// Consume one report line.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        match self.classifier.classify(line) {
            LineKind::QueryHeader { name } => self.start_query(name),
            LineKind::DomainHitSummary(summary) => self.add_hit(summary),
            LineKind::InclusionThreshold => {
                if let Some(ctx) = self.context.as_mut() {
                    ctx.state = ScanState::BelowThreshold;
                }
            }
            LineKind::AlignmentDetail(raw) => self.add_alignment(raw),
            LineKind::Ignored => {}
        }
    }

    /// Finish the pass and return the report.
    pub fn finish(self) -> Report {
        self.report
    }

    fn start_query(&mut self, name: &str) {
        // a repeated name keeps its original slot but starts over
        self.report.queries.insert(name.to_string(), Query::new(name));
        self.context = Some(ParserContext::new(name));
    }

    fn add_hit(&mut self, summary: HitSummary<'_>) {
        let Some(ctx) = self.context.as_ref() else {
            trace!("hit summary {} outside any query, skipped", summary.name);
            return;
        };
        let below_threshold = ctx.state == ScanState::BelowThreshold;
        let name = match (below_threshold, self.options.below_threshold) {
            (false, _) => summary.name.to_string(),
            (true, ThresholdPolicy::Keep) => format!("{}{}", summary.name, self.options.marker),
            (true, ThresholdPolicy::Drop) => {
                debug!("{}: dropping below-threshold hit {}", ctx.query, summary.name);
                return;
            }
        };
        let Some(query) = self.report.queries.get_mut(&ctx.query) else { return };
        query.push_hit(DomainHit {
            name,
            description: summary.description,
            significance: summary.significance,
            below_threshold,
            alignment: None,
        });
    }

    fn add_alignment(&mut self, raw: &str) {
        let Some(ctx) = self.context.as_mut() else { return };
        let Some(row) = AlignmentRow::parse(raw) else {
            trace!("{}: unparsable alignment row: {}", ctx.query, raw.trim());
            return;
        };
        if let Some(query) = self.report.queries.get_mut(&ctx.query) {
            ctx.cursor.resolve(query, &row);
        }
    }
}

/// Parse a whole report from its lines.
pub fn parse_report<I, S>(lines: I, options: &ParseOptions) -> Result<Report, HmmerError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = ReportBuilder::new(options.clone())?;
    for line in lines {
        builder.push_line(line.as_ref());
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
# hmmscan :: search sequence(s) against a profile database
Query:       q1  [L=200]
    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first model
    1.0e-10   40.0   0.1    2.0e-10   39.0   0.1    1.1  1  B  second model
  ------ inclusion threshold ------
       0.40   10.0   0.1       0.60    9.0   0.1    1.1  1  C  weak model
   1 !   69.0   0.1   1.0e-23   2.0e-20       1      40 ..      10      50 ..       9      51 .. 0.90
   1 !   39.0   0.1   1.0e-13   2.0e-10       1      10 ..      60      70 ..      59      71 .. 0.90
   2 !   35.0   0.1   1.0e-12   5.0e-11       1      20 ..     100     120 ..      99     121 .. 0.90
   1 ?    9.0   0.1   1.0e-03      0.60       1      30 ..     150     180 ..     149     181 .. 0.80
Query:       q2  [L=50]
";

    #[test]
    fn drop_policy_skips_below_threshold() {
        let r = parse_report(REPORT.lines(), &ParseOptions::default()).unwrap();
        let q1 = r.query("q1").unwrap();
        assert_eq!(q1.hit_count(), 2);
        assert_eq!(q1.hits.keys().collect::<Vec<_>>(), ["A", "B"]);
        // the C block has no hit to land on
        let b = q1.hits["B"].alignment.as_ref().unwrap();
        assert_eq!((b.query_start, b.query_end, b.evalue), (100, 120, 5.0e-11));
        assert_eq!(r.query("q2").unwrap().hit_count(), 0);
    }

    #[test]
    fn keep_policy_marks_below_threshold() {
        let r = parse_report(REPORT.lines(), &ParseOptions::keep()).unwrap();
        let q1 = r.query("q1").unwrap();
        assert_eq!(q1.hit_count(), 3);
        let c = &q1.hits["C!"];
        assert!(c.below_threshold);
        assert_eq!(c.description, "weak model");
        assert_eq!(c.alignment.as_ref().unwrap().query_start, 150);
        assert!(!q1.hits["A"].below_threshold);
    }

    #[test]
    fn custom_marker() {
        let opts = ParseOptions { below_threshold: ThresholdPolicy::Keep, marker: '?' };
        let r = parse_report(REPORT.lines(), &opts).unwrap();
        assert!(r.query("q1").unwrap().hits.contains_key("C?"));
    }

    #[test]
    fn threshold_resets_on_new_query() {
        let text = "\
Query: q1
  ------ inclusion threshold ------
Query: q2
    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first
";
        let mut b = ReportBuilder::new(ParseOptions::default()).unwrap();
        for l in text.lines().take(2) { b.push_line(l); }
        assert_eq!(b.context().unwrap().state, ScanState::BelowThreshold);
        for l in text.lines().skip(2) { b.push_line(l); }
        assert_eq!(b.context().unwrap().state, ScanState::InQuery);
        assert_eq!(b.finish().query("q2").unwrap().hit_count(), 1);
    }

    #[test]
    fn lines_before_first_query_are_ignored() {
        let lines = [
            "    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first",
            "   1 !   69.0   0.1   1.0e-23   2.0e-20       1      40 ..      10      50 ..       9      51 .. 0.90",
        ];
        let r = parse_report(lines, &ParseOptions::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn repeated_query_keeps_position_and_restarts() {
        let text = "\
Query: q1
    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first
Query: q2
Query: q1
    1.0e-10   40.0   0.1    2.0e-10   39.0   0.1    1.1  1  B  second
";
        let r = parse_report(text.lines(), &ParseOptions::default()).unwrap();
        assert_eq!(r.queries.keys().collect::<Vec<_>>(), ["q1", "q2"]);
        assert_eq!(r.query("q1").unwrap().hits.keys().collect::<Vec<_>>(), ["B"]);
    }

    #[test]
    fn crlf_lines() {
        let text = "Query: q1\r\n    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first\r\n";
        let r = parse_report(text.split('\n'), &ParseOptions::default()).unwrap();
        assert_eq!(r.query("q1").unwrap().hits["A"].description, "first");
    }
}
