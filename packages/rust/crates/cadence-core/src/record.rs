//! One record per period, assembled from the four generator lanes.

use serde::Serialize;

use crate::generators::{Counter, Lcg, PerfectSquares, Timestamps, zip_lanes};

/// A single row of synthetic data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Datum {
    /// Position in the stream, starting at 1.
    pub sequence_number: u64,
    /// Unix seconds when the row was pulled.
    pub timestamp: i64,
    /// `sequence_number` squared.
    pub perfect_square: u64,
    /// Next value of the LCG lane.
    pub random_number: u64,
}

impl From<(u64, i64, u64, u64)> for Datum {
    fn from(
        (sequence_number, timestamp, perfect_square, random_number): (u64, i64, u64, u64),
    ) -> Self {
        Self {
            sequence_number,
            timestamp,
            perfect_square,
            random_number,
        }
    }
}

/// Endless stream of [`Datum`] on the system clock.
///
/// `seed` pins the random lane; `None` seeds it from time and pid.
pub fn datum_stream(seed: Option<u64>) -> impl Iterator<Item = Datum> {
    datum_stream_from(Counter::new(), Timestamps::new(), Lcg::from_optional_seed(seed))
}

/// Stream of [`Datum`] over explicit counter, timestamp and random lanes.
pub fn datum_stream_from<C, S, R>(counter: C, timestamps: S, random: R) -> impl Iterator<Item = Datum>
where
    C: Iterator<Item = u64>,
    S: Iterator<Item = i64>,
    R: Iterator<Item = u64>,
{
    zip_lanes((counter, timestamps, PerfectSquares::new(), random)).map(Datum::from)
}
