//! Tabular output of selected (or all resolved) domain hits.
//!
//! The table has one row per domain:
//!
//! ```text
//! Query name,Description,Name,significance,hits,hit_start,hit_end,query_start,query_end,Length
//! seq1,Protein kinase domain,Pkinase,1.3e-40,2,1,260,20,250,230
//! ```
//!
//! `hits` is the number of hits recorded for the query, not the number of
//! selected rows. Floats are written with the shortest round-trip digits;
//! magnitudes below `1e-4` or from `1e16` up use a signed two-digit exponent
//! (`1e-05`, `0.32`, `3100.0`, `1e+16`).
//!
use std::io::Write;

use log::warn;

use crate::common::HmmerError;
use crate::overlap::Selection;
use crate::report::{DomainHit, Query, Report};

/// Column names of the selection table.
pub const HEADER: [&str; 10] = [
    "Query name", "Description", "Name", "significance", "hits",
    "hit_start", "hit_end", "query_start", "query_end", "Length",
];

/// Format a float: positional in `[1e-4, 1e16)`, otherwise `<mantissa>e±XX`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() { return "nan".to_string(); }
    if v.is_infinite() { return if v > 0.0 { "inf".to_string() } else { "-inf".to_string() }; }
    if v == 0.0 { return format!("{:?}", v); }
    let sci = format!("{:e}", v);
    let Some((mantissa, exp)) = sci.split_once('e') else { return v.to_string() };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= 16 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        format!("{:?}", v)
    }
}

fn hit_row(query: &Query, hit: &DomainHit) -> Vec<String> {
    let mut row = vec![
        query.name.clone(),
        hit.description.clone(),
        hit.name.clone(),
        format_float(hit.significance),
        query.hit_count().to_string(),
    ];
    match &hit.alignment {
        Some(a) => row.extend([a.hit_start, a.hit_end, a.query_start, a.query_end, a.length].map(|x| x.to_string())),
        None => row.extend(std::iter::repeat(String::new()).take(5)),
    }
    row
}

// rows end in CRLF, as the tables this tool replaces did
fn writer<W: Write>(out: W, delimiter: u8) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out)
}

/// Write the selected domains of every query, in query then selection order.
/// Returns the number of data rows written.
pub fn write_selection<W: Write>(out: W, report: &Report, selection: &Selection, delimiter: u8) -> Result<usize, HmmerError> {
    let mut w = writer(out, delimiter);
    w.write_record(HEADER)?;
    let mut rows = 0usize;
    for (qname, query) in &report.queries {
        let Some(picks) = selection.get(qname) else { continue };
        for name in picks {
            let Some(hit) = query.hits.get(name) else {
                warn!("{}: selected domain {} not found, skipped", qname, name);
                continue;
            };
            w.write_record(hit_row(query, hit))?;
            rows += 1;
        }
    }
    w.flush()?;
    Ok(rows)
}

/// Write every recorded hit with its best alignment, before overlap
/// selection. An extra `aligned` column tells whether coordinates are present.
pub fn write_hits<W: Write>(out: W, report: &Report, delimiter: u8) -> Result<usize, HmmerError> {
    let mut w = writer(out, delimiter);
    w.write_record(HEADER.iter().copied().chain(["aligned"]))?;
    let mut rows = 0usize;
    for query in report.queries.values() {
        for hit in query.hits.values() {
            let mut row = hit_row(query, hit);
            row.push(hit.alignment.is_some().to_string());
            w.write_record(&row)?;
            rows += 1;
        }
    }
    w.flush()?;
    Ok(rows)
}
