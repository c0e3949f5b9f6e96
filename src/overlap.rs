//! Greedy selection of non-overlapping domains per query.
//!
//! Candidates are the hits of a query that carry an alignment. They are tried
//! once each, longest first (equal lengths in encounter order). A candidate is
//! accepted when
//! - nothing has been accepted yet, or
//! - it lies entirely before the first or after the last accepted interval, or
//! - it fits strictly inside the gap between two accepted intervals that are
//!   adjacent when sorted by start.
//!
//! Everything else is rejected for good. This is a heuristic rather than an
//! optimal interval scheduler. A long domain spanning several short ones
//! shadows all of them, even where two short ones would cover more residues.
//!
//! ### Example
//! ```rust
//! use hmmer_domains::{select_intervals, Candidate};
//! let picks = select_intervals(&[
//!     Candidate { name: "A", start: 10, end: 50 },
//!     Candidate { name: "B", start: 5, end: 15 },
//!     Candidate { name: "C", start: 60, end: 80 },
//! ]);
//! assert_eq!(picks, ["A", "C"]);
//! ```
//!
use indexmap::IndexMap;
use log::warn;

use crate::report::{Query, Report};

/// An interval on the query sequence competing for selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub name: &'a str,
    pub start: i64,
    pub end: i64,
}

impl Candidate<'_> {
    pub fn length(&self) -> i64 {
        self.end - self.start
    }
}

/// Selected domain names per query, in query order.
pub type Selection = IndexMap<String, Vec<String>>;

/// Run the greedy selection over `candidates` (given in encounter order) and
/// return the accepted names in acceptance order.
pub fn select_intervals<'a>(candidates: &[Candidate<'a>]) -> Vec<&'a str> {
    let mut order: Vec<&Candidate<'a>> = candidates.iter().collect();
    // stable: equal lengths stay in encounter order
    order.sort_by(|a, b| b.length().cmp(&a.length()));

    let mut accepted: Vec<(i64, i64)> = Vec::new();
    let mut names: Vec<&'a str> = Vec::new();
    for c in order {
        if fits(&mut accepted, c) {
            accepted.push((c.start, c.end));
            names.push(c.name);
        }
    }
    names
}

fn fits(accepted: &mut [(i64, i64)], c: &Candidate<'_>) -> bool {
    if accepted.is_empty() { return true; }
    let min_start = accepted.iter().map(|&(s, _)| s).min().unwrap_or(i64::MIN);
    let max_end = accepted.iter().map(|&(_, e)| e).max().unwrap_or(i64::MAX);
    if c.end < min_start || c.start > max_end { return true; }
    accepted.sort_by_key(|&(s, _)| s);
    accepted.windows(2).any(|w| c.start > w[0].1 && c.end < w[1].0)
}

/// Candidates of one query, in hit order. Hits without an alignment are
/// reported and left out.
pub fn candidates(query: &Query) -> Vec<Candidate<'_>> {
    query.hits.values()
        .filter_map(|hit| match &hit.alignment {
            Some(a) => Some(Candidate { name: hit.name.as_str(), start: a.query_start, end: a.query_end }),
            None => {
                warn!("{}: domain {} has no alignment, excluded from selection", query.name, hit.name);
                None
            }
        })
        .collect()
}

/// Selected domain names of one query; `None` when it has no candidates.
pub fn select_query(query: &Query) -> Option<Vec<String>> {
    let cands = candidates(query);
    if cands.is_empty() { return None; }
    Some(select_intervals(&cands).into_iter().map(str::to_string).collect())
}

/// Selection for every query of `report` that has at least one candidate.
pub fn select_all(report: &Report) -> Selection {
    report.queries.iter()
        .filter_map(|(name, q)| select_query(q).map(|picks| (name.clone(), picks)))
        .collect()
}
