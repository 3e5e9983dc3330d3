//! The upload loop: one record per period through a [`PeriodicRunner`].

use cadence_core::generators::{Counter, PerfectSquares, Timestamps, zip_lanes};
use cadence_core::{Clock, PeriodicRunner, StepError, Tick};

use crate::client::{MetricPoint, MetricSink};
use crate::error::UploadError;

/// Counters reported when the loop ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Uploads accepted by the server.
    pub accepted: u64,
    /// Attempts discarded and re-run.
    pub retries: u64,
    /// Whether the loop stopped on the repetition bound.
    pub exhausted: bool,
}

/// Rows of `(sequence number, timestamp, perfect square)` on the system clock.
///
/// `limit` bounds the counter lane, which ends the zip after that many rows.
pub fn upload_rows(limit: Option<u64>) -> impl Iterator<Item = (u64, i64, u64)> {
    let counter = limit.map_or_else(Counter::new, Counter::with_limit);
    zip_lanes((counter, Timestamps::new(), PerfectSquares::new()))
}

/// Drive `runner` over `rows`, posting each row's perfect square to `sink`.
///
/// Stops when the runner reports exhaustion or `rows` ends. Rows that run out
/// exactly at the repetition bound count as exhaustion too, so a counter lane
/// bounded like the runner still reports it.
///
/// # Errors
///
/// Propagates the first upload failure the schedule does not retry.
pub fn drive_uploads<S, C, I>(
    sink: &S,
    runner: &mut PeriodicRunner<u16, C>,
    rows: I,
) -> Result<UploadSummary, StepError<UploadError>>
where
    S: MetricSink + ?Sized,
    C: Clock,
    I: IntoIterator<Item = (u64, i64, u64)>,
{
    let mut summary = UploadSummary::default();
    for (sequence_number, timestamp, perfect_square) in rows {
        let point = MetricPoint {
            timestamp,
            value: perfect_square,
        };
        let tick = runner.run_once(|| sink.send(&point));
        summary.retries = runner.state().retries;
        match tick? {
            Tick::Fired(status) => {
                summary.accepted += 1;
                tracing::info!(
                    event = "cadence.upload.accepted",
                    sequence_number,
                    timestamp,
                    value = perfect_square,
                    status,
                    "metric uploaded"
                );
            }
            Tick::Exhausted => {
                summary.exhausted = true;
                return Ok(summary);
            }
        }
    }
    summary.exhausted = runner
        .config()
        .max_repetitions
        .is_some_and(|max| runner.state().current_repetition >= max);
    Ok(summary)
}
