//! Preview rows of the four-lane data stream.

use cadence_core::{Datum, datum_stream};
use serde::Serialize;

/// One preview line: a countdown and the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    /// Rows left including this one.
    pub remaining: u64,
    /// The record.
    pub datum: Datum,
}

/// First `count` rows of the data stream, counting down.
pub fn sample_rows(count: u64, seed: Option<u64>) -> impl Iterator<Item = SampleRow> {
    (0..count)
        .zip(datum_stream(seed))
        .map(move |(index, datum)| SampleRow {
            remaining: count - index,
            datum,
        })
}

/// Render `rows` as JSON lines.
///
/// # Errors
///
/// Returns the first serialization failure.
pub fn render_json_lines<I>(rows: I) -> Result<String, serde_json::Error>
where
    I: IntoIterator<Item = SampleRow>,
{
    let mut out = String::new();
    for row in rows {
        out.push_str(&serde_json::to_string(&row)?);
        out.push('\n');
    }
    Ok(out)
}
