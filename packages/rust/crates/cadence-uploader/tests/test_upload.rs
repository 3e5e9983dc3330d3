#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

use cadence_core::{ManualClock, PeriodicRunner, RetryPolicy, ScheduleConfig, StepError};
use cadence_uploader::{
    KIND_UPLOAD, MetricPoint, MetricSink, UploadError, UploadSummary, drive_uploads, upload_rows,
};

/// Sink answering from a script; an empty script accepts everything.
struct ScriptedSink {
    script: RefCell<VecDeque<Result<u16, UploadError>>>,
    delivered: RefCell<Vec<(Duration, MetricPoint)>>,
    clock: ManualClock,
}

impl ScriptedSink {
    fn new(clock: &ManualClock, script: Vec<Result<u16, UploadError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            delivered: RefCell::new(Vec::new()),
            clock: clock.clone(),
        }
    }
}

impl MetricSink for ScriptedSink {
    fn send(&self, point: &MetricPoint) -> Result<u16, UploadError> {
        let outcome = self.script.borrow_mut().pop_front().unwrap_or(Ok(200));
        if outcome.is_ok() {
            self.delivered
                .borrow_mut()
                .push((self.clock.elapsed(), *point));
        }
        outcome
    }
}

fn rows(count: u64) -> impl Iterator<Item = (u64, i64, u64)> {
    (1..=count).map(|n| (n, 1_600_000_000 + i64::try_from(n).unwrap_or_default(), n * n))
}

fn encode_failure() -> UploadError {
    UploadError::Encode(serde_json::from_str::<u8>("not json").expect_err("invalid json"))
}

fn schedule() -> ScheduleConfig<u16> {
    ScheduleConfig::every(Duration::from_secs(300))
        .with_resolution(Duration::from_millis(1))
        .with_retry(RetryPolicy::new().retry_kind(KIND_UPLOAD))
}

#[test]
fn uploads_squares_once_per_interval() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(&clock, Vec::new());
    let mut runner = PeriodicRunner::with_clock(schedule(), clock.clone()).expect("schedule");

    let summary = drive_uploads(&sink, &mut runner, rows(3)).expect("all accepted");

    assert_eq!(
        summary,
        UploadSummary {
            accepted: 3,
            retries: 0,
            exhausted: false,
        }
    );
    let delivered = sink.delivered.borrow();
    let times: Vec<Duration> = delivered.iter().map(|(at, _)| *at).collect();
    assert_eq!(
        times,
        vec![
            Duration::ZERO,
            Duration::from_secs(300),
            Duration::from_secs(600)
        ]
    );
    let values: Vec<u64> = delivered.iter().map(|(_, point)| point.value).collect();
    assert_eq!(values, vec![1, 4, 9]);
}

#[test]
fn rejected_upload_is_retried_with_same_point() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(
        &clock,
        vec![Ok(200), Err(UploadError::Rejected(502)), Ok(200)],
    );
    let mut runner = PeriodicRunner::with_clock(schedule(), clock.clone()).expect("schedule");

    let summary = drive_uploads(&sink, &mut runner, rows(2)).expect("retried");

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.retries, 1);
    let values: Vec<u64> = sink
        .delivered
        .borrow()
        .iter()
        .map(|(_, point)| point.value)
        .collect();
    assert_eq!(values, vec![1, 4]);
}

#[test]
fn repetition_bound_stops_before_rows_run_out() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(&clock, Vec::new());
    let mut runner =
        PeriodicRunner::with_clock(schedule().with_max_repetitions(2), clock.clone())
            .expect("schedule");

    let summary = drive_uploads(&sink, &mut runner, rows(10)).expect("bounded");

    assert_eq!(summary.accepted, 2);
    assert!(summary.exhausted);
    assert_eq!(sink.delivered.borrow().len(), 2);
}

#[test]
fn unretried_failure_ends_the_loop() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(&clock, vec![Ok(200), Err(encode_failure())]);
    let mut runner = PeriodicRunner::with_clock(schedule(), clock.clone()).expect("schedule");

    let error = drive_uploads(&sink, &mut runner, rows(5)).expect_err("encode is fatal");

    assert!(matches!(
        error,
        StepError::Operation(UploadError::Encode(_))
    ));
    assert_eq!(sink.delivered.borrow().len(), 1);
    assert_eq!(runner.state().current_repetition, 1);
}

#[test]
fn bounded_upload_rows_stop_after_limit() {
    let rows: Vec<(u64, i64, u64)> = upload_rows(Some(3)).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|row| row.2).collect::<Vec<_>>(),
        vec![1, 4, 9]
    );
    assert_eq!(upload_rows(None).take(5).count(), 5);
}

#[test]
fn rows_bounded_like_the_runner_report_exhaustion() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(&clock, vec![Err(UploadError::Rejected(503))]);
    let mut runner =
        PeriodicRunner::with_clock(schedule().with_max_repetitions(3), clock.clone())
            .expect("schedule");

    let summary =
        drive_uploads(&sink, &mut runner, upload_rows(Some(3))).expect("bounded run");

    assert_eq!(
        summary,
        UploadSummary {
            accepted: 3,
            retries: 1,
            exhausted: true,
        }
    );
}

#[test]
fn rows_ending_before_the_bound_are_not_exhaustion() {
    let clock = ManualClock::new();
    let sink = ScriptedSink::new(&clock, Vec::new());
    let mut runner =
        PeriodicRunner::with_clock(schedule().with_max_repetitions(5), clock.clone())
            .expect("schedule");

    let summary = drive_uploads(&sink, &mut runner, rows(2)).expect("rows ran out");

    assert_eq!(summary.accepted, 2);
    assert!(!summary.exhausted);
}
