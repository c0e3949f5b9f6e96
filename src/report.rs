//! In-memory model of a parsed `hmmscan` report.
//!
//! A [`Report`] holds one [`Query`] per `Query:` header, in first-seen order.
//! Each query owns its [`DomainHit`]s keyed by (possibly marker-suffixed)
//! model name, again in encounter order, plus the positional list of names
//! used to attribute alignment blocks.
//!
use indexmap::IndexMap;

use crate::align::AlignmentRow;

/// Best alignment recorded for a domain hit.
#[derive(Clone, Debug, PartialEq)]
pub struct Alignment {
    /// Independent E-value of the alignment (lower is better).
    pub evalue: f64,
    /// Start coordinate on the profile.
    pub hit_start: i64,
    /// End coordinate on the profile.
    pub hit_end: i64,
    /// Start coordinate on the query sequence.
    pub query_start: i64,
    /// End coordinate on the query sequence.
    pub query_end: i64,
    /// `query_end - query_start`.
    pub length: i64,
}

impl From<&AlignmentRow> for Alignment {
    fn from(row: &AlignmentRow) -> Self {
        Self {
            evalue: row.evalue,
            hit_start: row.hit_start,
            hit_end: row.hit_end,
            query_start: row.query_start,
            query_end: row.query_end,
            length: row.length,
        }
    }
}

/// One reported model hit against a query.
#[derive(Clone, Debug, PartialEq)]
pub struct DomainHit {
    /// Model name, with the marker appended when kept below threshold.
    pub name: String,
    /// Model description from the summary line.
    pub description: String,
    /// Full-sequence E-value from the summary line.
    pub significance: f64,
    /// Whether the hit was listed after the inclusion threshold.
    pub below_threshold: bool,
    /// Best alignment, once one has been attributed.
    pub alignment: Option<Alignment>,
}

/// All hits reported for one query sequence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Query {
    /// Query sequence name.
    pub name: String,
    /// Hits keyed by domain name, in encounter order.
    pub hits: IndexMap<String, DomainHit>,
    /// Domain names in summary order, one entry per recorded summary line.
    pub domain_order: Vec<String>,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Number of recorded summary lines.
    pub fn hit_count(&self) -> usize {
        self.domain_order.len()
    }

    /// Record a hit. A repeated name replaces the earlier hit in place but
    /// still takes a new position in `domain_order`.
    pub fn push_hit(&mut self, hit: DomainHit) {
        self.domain_order.push(hit.name.clone());
        self.hits.insert(hit.name.clone(), hit);
    }
}

/// A parsed report.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Queries keyed by name, in first-seen order.
    pub queries: IndexMap<String, Query>,
}

impl Report {
    pub fn query(&self, name: &str) -> Option<&Query> {
        self.queries.get(name)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}
