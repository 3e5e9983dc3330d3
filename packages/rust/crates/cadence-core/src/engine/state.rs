use std::time::Duration;

/// Where a runner sits between calls to `run_once`.
///
/// Firing and retrying happen inside a single `run_once` call and are never
/// observable from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No invocation has happened yet; the next step fires immediately.
    AwaitingFirstFire,
    /// At least one accepted invocation; the next step waits for the period.
    Waiting,
    /// The repetition bound was reached. Terminal.
    Exhausted,
    /// An unretried failure propagated. Terminal.
    Halted,
}

impl Phase {
    /// Whether the runner will never invoke the operation again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Halted)
    }
}

/// Mutable bookkeeping owned by exactly one runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleState {
    /// Clock reading taken right before the last accepted invocation.
    pub previous_fire: Option<Duration>,
    /// Accepted invocations so far.
    pub current_repetition: u64,
    /// Set until the first attempt is made.
    pub first_tick: bool,
    /// Attempts discarded as retry-worthy over the runner's lifetime.
    pub retries: u64,
    /// Current phase.
    pub phase: Phase,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            previous_fire: None,
            current_repetition: 0,
            first_tick: true,
            retries: 0,
            phase: Phase::AwaitingFirstFire,
        }
    }
}
