//! Attribution of per-domain alignment rows to hit summaries.
//!
//! In the "Domain annotation for each model" section, `hmmscan` prints one
//! table per model, in the same order as the hit summaries. Each table row is
//! one domain occurrence:
//!
//! ```text
//!    #    score  bias  c-Evalue  i-Evalue hmmfrom  hmm to    alifrom  ali to    envfrom  env to     acc
//!  ---   ------ ----- --------- --------- ------- -------    ------- -------    ------- -------    ----
//!    1 !  136.5   0.1   1.1e-43   2.1e-40       1     260 []      20     250 ..      20     251 .. 0.95
//! ```
//!
//! Row `1` opens the table of the next model in summary order; later rows
//! continue it. Attribution is purely positional. Model names are never
//! consulted. For every model only the row with the lowest i-Evalue is kept.
//!
use log::{debug, trace};

use crate::report::{Alignment, Query};

/// Fields of one alignment detail row.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentRow {
    /// Domain index within the model table; `1` opens a new table.
    pub ordinal: u32,
    /// Independent E-value.
    pub evalue: f64,
    pub hit_start: i64,
    pub hit_end: i64,
    pub query_start: i64,
    pub query_end: i64,
    /// `query_end - query_start`.
    pub length: i64,
}

impl AlignmentRow {
    /// Extract the positional fields. Returns `None` if any is missing, does
    /// not parse, or the query span does not fit in an `i64`.
    pub fn parse(line: &str) -> Option<Self> {
        let f: Vec<&str> = line.split_whitespace().collect();
        if f.len() < 11 { return None; }
        let query_start: i64 = f[9].parse().ok()?;
        let query_end: i64 = f[10].parse().ok()?;
        Some(Self {
            ordinal: f[0].parse().ok()?,
            evalue: f[5].parse().ok()?,
            hit_start: f[6].parse().ok()?,
            hit_end: f[7].parse().ok()?,
            query_start,
            query_end,
            length: query_end.checked_sub(query_start)?,
        })
    }

    pub fn opens_block(&self) -> bool {
        self.ordinal == 1
    }
}

/// Per-query position in the domain order list.
#[derive(Clone, Debug, Default)]
pub struct AlignmentCursor {
    /// Next unconsumed index into `Query::domain_order`.
    next: usize,
    /// Domain the current block is attributed to.
    target: Option<String>,
    /// Set once a block opens past the last recorded hit.
    exhausted: bool,
}

impl AlignmentCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Domain currently receiving rows, if any.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Attribute `row` to a hit of `query`, keeping the best alignment.
    pub fn resolve(&mut self, query: &mut Query, row: &AlignmentRow) {
        if self.exhausted { return; }
        if row.opens_block() {
            let Some(name) = query.domain_order.get(self.next) else {
                debug!("{}: alignment block {} has no matching hit; ignoring remaining blocks", query.name, self.next + 1);
                self.exhausted = true;
                self.target = None;
                return;
            };
            self.target = Some(name.clone());
            self.next += 1;
        }
        let Some(name) = self.target.as_deref() else {
            trace!("{}: continuation row before any block, skipped", query.name);
            return;
        };
        let Some(hit) = query.hits.get_mut(name) else { return };
        let improves = match &hit.alignment {
            None => true,
            Some(best) => row.evalue < best.evalue,
        };
        if improves {
            hit.alignment = Some(Alignment::from(row));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DomainHit;

    fn hit(name: &str) -> DomainHit {
        DomainHit { name: name.into(), description: String::new(), significance: 1e-5, below_threshold: false, alignment: None }
    }

    fn query(names: &[&str]) -> Query {
        let mut q = Query::new("q");
        for n in names { q.push_hit(hit(n)); }
        q
    }

    fn row(ordinal: u32, evalue: f64, qs: i64, qe: i64) -> AlignmentRow {
        AlignmentRow { ordinal, evalue, hit_start: 1, hit_end: 20, query_start: qs, query_end: qe, length: qe - qs }
    }

    #[test]
    fn parse_detail_row() {
        let r = AlignmentRow::parse("   2 ?   -2.1   0.0      0.23   3.1e+03     100     120 ..     300     320 ..     290     330 .. 0.70").unwrap();
        assert_eq!(r.ordinal, 2);
        assert_eq!(r.evalue, 3.1e3);
        assert_eq!((r.hit_start, r.hit_end, r.query_start, r.query_end), (100, 120, 300, 320));
        assert!(AlignmentRow::parse("Description: odd?").is_none());
        assert!(AlignmentRow::parse("   x !  1 2 3 4 5 6 7 8 9 10").is_none());
    }

    #[test]
    fn overflowing_span_is_rejected() {
        let line = "   1 !   69.0   0.1   1.0e-23   2.0e-20       1      40 ..  -9223372036854775808 9223372036854775807 ..       9      51 .. 0.90";
        assert!(AlignmentRow::parse(line).is_none());

        let text = format!("Query: q\n    1.0e-20   70.0   0.1    2.0e-20   69.0   0.1    1.1  1  A  first\n{}\n", line);
        let report = crate::parse_report(text.lines(), &crate::ParseOptions::default()).unwrap();
        assert!(report.query("q").unwrap().hits["A"].alignment.is_none());
    }

    #[test]
    fn blocks_follow_summary_order() {
        let mut q = query(&["A", "B"]);
        let mut c = AlignmentCursor::new();
        c.resolve(&mut q, &row(1, 1e-3, 10, 50));
        assert_eq!(c.target(), Some("A"));
        c.resolve(&mut q, &row(1, 1e-4, 60, 80));
        assert_eq!(c.target(), Some("B"));
        assert_eq!(q.hits["A"].alignment.as_ref().unwrap().query_start, 10);
        assert_eq!(q.hits["B"].alignment.as_ref().unwrap().length, 20);
    }

    #[test]
    fn best_evalue_wins_first_on_ties() {
        let mut q = query(&["A"]);
        let mut c = AlignmentCursor::new();
        c.resolve(&mut q, &row(1, 1e-3, 10, 50));
        c.resolve(&mut q, &row(2, 1e-9, 100, 130));
        c.resolve(&mut q, &row(3, 1e-9, 200, 290));
        c.resolve(&mut q, &row(4, 0.5, 1, 300));
        let a = q.hits["A"].alignment.as_ref().unwrap();
        assert_eq!(a.evalue, 1e-9);
        assert_eq!((a.query_start, a.query_end, a.length), (100, 130, 30));
    }

    #[test]
    fn extra_blocks_are_discarded() {
        let mut q = query(&["A"]);
        let mut c = AlignmentCursor::new();
        c.resolve(&mut q, &row(1, 1e-3, 10, 50));
        c.resolve(&mut q, &row(1, 1e-30, 60, 80));
        assert!(c.is_exhausted());
        c.resolve(&mut q, &row(2, 1e-40, 1, 2));
        let a = q.hits["A"].alignment.as_ref().unwrap();
        assert_eq!(a.evalue, 1e-3);
    }

    #[test]
    fn continuation_without_block_is_skipped() {
        let mut q = query(&["A"]);
        let mut c = AlignmentCursor::new();
        c.resolve(&mut q, &row(2, 1e-3, 10, 50));
        assert!(q.hits["A"].alignment.is_none());
        assert_eq!(c.target(), None);
    }

    #[test]
    fn empty_query_exhausts_immediately() {
        let mut q = Query::new("q");
        let mut c = AlignmentCursor::new();
        c.resolve(&mut q, &row(1, 1e-3, 10, 50));
        assert!(c.is_exhausted());
    }
}
