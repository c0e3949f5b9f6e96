//! Line classification for `hmmscan` text reports.
//!
//! Every report line falls into exactly one [`LineKind`]. The decision is made
//! by an ordered table of rules; each rule is a predicate plus extractor that
//! either claims the line (returning the tagged kind with its fields) or passes
//! it on to the next rule. Lines no rule claims are [`LineKind::Ignored`].
//!
//! Rule order:
//! 1. comment lines (`#…`) and lines containing `*` (posterior-probability
//!    rows, truncation markers) are ignored outright;
//! 2. `Query:` headers;
//! 3. per-model hit summaries (3–10 space indent, eight numeric columns, then
//!    the model name and description);
//! 4. the `------ inclusion threshold ------` separator;
//! 5. any other line carrying a `!` or `?` significance flag is an alignment
//!    detail row.
//!
//! ### Example
//! ```rust
//! use hmmer_domains::{LineClassifier, LineKind};
//! let c = LineClassifier::new().unwrap();
//! assert_eq!(c.classify("Query:       seq1  [L=300]"), LineKind::QueryHeader { name: "seq1" });
//! assert_eq!(c.classify("  ------ inclusion threshold ------"), LineKind::InclusionThreshold);
//! ```
//!
use regex::Regex;

use crate::common::HmmerError;

/// Literal text of the inclusion threshold separator.
pub const INCLUSION_THRESHOLD: &str = "------ inclusion threshold ------";

/// Number of numeric columns preceding the model name in a hit summary.
const SUMMARY_NUMERIC_COLUMNS: usize = 8;

/// Fields extracted from a per-model hit summary line.
#[derive(Clone, Debug, PartialEq)]
pub struct HitSummary<'a> {
    /// Full-sequence E-value (first numeric column).
    pub significance: f64,
    /// Model name (first token after the numeric columns).
    pub name: &'a str,
    /// Remaining tokens joined by single spaces.
    pub description: String,
}

/// Tagged kind of a report line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineKind<'a> {
    /// `Query:` line carrying the query name.
    QueryHeader { name: &'a str },
    /// Hit summary row for one model.
    DomainHitSummary(HitSummary<'a>),
    /// The inclusion threshold separator.
    InclusionThreshold,
    /// Per-domain alignment row; fields are extracted by the resolver.
    AlignmentDetail(&'a str),
    /// Anything else.
    Ignored,
}

type Rule = for<'a> fn(&LineClassifier, &'a str) -> Option<LineKind<'a>>;

/// Rules in priority order; the first one returning `Some` wins.
const RULES: [(&str, Rule); 5] = [
    ("ignored", ignored),
    ("query-header", query_header),
    ("hit-summary", hit_summary),
    ("inclusion-threshold", inclusion_threshold),
    ("alignment-detail", alignment_detail),
];

/// Classifies report lines. Patterns are compiled once on construction.
#[derive(Clone, Debug)]
pub struct LineClassifier {
    indent: Regex,
    numeric: Regex,
}

impl LineClassifier {
    /// Compile the line patterns.
    pub fn new() -> Result<Self, HmmerError> {
        Ok(Self {
            indent: Regex::new(r"^ {3,10}\S")?,
            numeric: Regex::new(r"^-?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")?,
        })
    }

    /// Tag a single line (without its trailing newline).
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        RULES.iter()
            .find_map(|(_, rule)| rule(self, line))
            .unwrap_or(LineKind::Ignored)
    }

    fn is_numeric(&self, token: &str) -> bool {
        self.numeric.is_match(token)
    }
}

fn ignored<'a>(_: &LineClassifier, line: &'a str) -> Option<LineKind<'a>> {
    (line.starts_with('#') || line.contains('*')).then_some(LineKind::Ignored)
}

fn query_header<'a>(_: &LineClassifier, line: &'a str) -> Option<LineKind<'a>> {
    let rest = line.strip_prefix("Query:")?;
    // a bare "Query:" falls through and ends up ignored
    let name = rest.split_whitespace().next()?;
    Some(LineKind::QueryHeader { name })
}

fn hit_summary<'a>(c: &LineClassifier, line: &'a str) -> Option<LineKind<'a>> {
    if !c.indent.is_match(line) { return None; }
    let tokens: Vec<&'a str> = line.split_whitespace().collect();
    if tokens.len() <= SUMMARY_NUMERIC_COLUMNS { return None; }
    let (numbers, rest) = tokens.split_at(SUMMARY_NUMERIC_COLUMNS);
    if !numbers.iter().all(|t| c.is_numeric(t)) || c.is_numeric(rest[0]) {
        return None;
    }
    let significance = numbers[0].parse::<f64>().ok()?;
    Some(LineKind::DomainHitSummary(HitSummary {
        significance,
        name: rest[0],
        description: rest[1..].join(" "),
    }))
}

fn inclusion_threshold<'a>(_: &LineClassifier, line: &'a str) -> Option<LineKind<'a>> {
    (line.trim() == INCLUSION_THRESHOLD).then_some(LineKind::InclusionThreshold)
}

fn alignment_detail<'a>(_: &LineClassifier, line: &'a str) -> Option<LineKind<'a>> {
    line.contains(|ch: char| ch == '?' || ch == '!').then_some(LineKind::AlignmentDetail(line))
}
