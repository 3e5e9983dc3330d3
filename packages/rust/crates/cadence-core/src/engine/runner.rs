use std::fmt::Display;

use crate::clock::{Clock, SystemClock};
use crate::error::{ScheduleError, StepError};

use super::config::ScheduleConfig;
use super::retry::FailureKind;
use super::state::{Phase, ScheduleState};

/// Result of one successful `run_once` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick<T> {
    /// The operation ran and its outcome was accepted.
    Fired(T),
    /// The repetition bound is reached; the operation was not invoked.
    Exhausted,
}

impl<T> Tick<T> {
    /// Whether the caller should stop driving the runner.
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Transient positions inside one `run_once` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Waiting,
    Firing,
    RetryingFire,
}

/// Runs an operation every `period`, anchored on the start of each accepted
/// invocation so the operation's own runtime does not accumulate as drift.
///
/// The caller drives the schedule: each [`Self::run_once`] blocks until the
/// next fire is due, invokes the operation (re-attempting retry-worthy
/// outcomes immediately) and returns.
#[derive(Debug)]
pub struct PeriodicRunner<T, C = SystemClock> {
    config: ScheduleConfig<T>,
    clock: C,
    state: ScheduleState,
}

impl<T> PeriodicRunner<T, SystemClock>
where
    T: PartialEq + Display,
{
    /// Runner on real time.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] when the configuration is invalid.
    pub fn new(config: ScheduleConfig<T>) -> Result<Self, ScheduleError> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<T, C> PeriodicRunner<T, C>
where
    T: PartialEq + Display,
    C: Clock,
{
    /// Runner on an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] when the configuration is invalid.
    pub fn with_clock(config: ScheduleConfig<T>, clock: C) -> Result<Self, ScheduleError> {
        config.validate()?;
        Ok(Self {
            config,
            clock,
            state: ScheduleState::default(),
        })
    }

    /// Configuration this runner was built with.
    pub fn config(&self) -> &ScheduleConfig<T> {
        &self.config
    }

    /// Snapshot of the schedule bookkeeping.
    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Wait until the next fire is due, then invoke `operation` once in
    /// accepted form.
    ///
    /// Retry-worthy outcomes are logged and re-attempted immediately without
    /// counting toward the repetition bound. Returns [`Tick::Exhausted`]
    /// without invoking once the bound is reached.
    ///
    /// # Errors
    ///
    /// [`StepError::Operation`] carries an unclassified failure; the runner is
    /// halted afterwards and every later call returns [`StepError::Halted`].
    pub fn run_once<F, E>(&mut self, mut operation: F) -> Result<Tick<T>, StepError<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: FailureKind + std::error::Error + 'static,
    {
        match self.state.phase {
            Phase::Exhausted => return Ok(Tick::Exhausted),
            Phase::Halted => return Err(StepError::Halted),
            Phase::AwaitingFirstFire | Phase::Waiting => {}
        }

        let mut step = if self.state.first_tick {
            Step::Firing
        } else {
            Step::Waiting
        };

        loop {
            step = match step {
                Step::Waiting => {
                    if self.is_due() {
                        Step::Firing
                    } else {
                        self.clock.sleep(self.config.resolution);
                        Step::Waiting
                    }
                }
                Step::Firing | Step::RetryingFire => {
                    let fired_at = self.clock.now();
                    self.state.first_tick = false;
                    if !self.reserve_repetition() {
                        self.state.phase = Phase::Exhausted;
                        tracing::info!(
                            event = "cadence.runner.exhausted",
                            repetitions = self.state.current_repetition,
                            retries = self.state.retries,
                            "repetition bound reached; schedule complete"
                        );
                        return Ok(Tick::Exhausted);
                    }

                    let outcome = operation();
                    if let Some(cause) = self.config.retry.classify(&outcome) {
                        self.release_repetition();
                        self.state.retries += 1;
                        tracing::warn!(
                            event = "cadence.runner.retry",
                            repetition = self.state.current_repetition + 1,
                            retries = self.state.retries,
                            "{cause}, retrying"
                        );
                        Step::RetryingFire
                    } else {
                        return match outcome {
                            Ok(value) => {
                                self.state.previous_fire = Some(fired_at);
                                self.state.phase = Phase::Waiting;
                                Ok(Tick::Fired(value))
                            }
                            Err(error) => {
                                self.release_repetition();
                                self.state.phase = Phase::Halted;
                                Err(StepError::Operation(error))
                            }
                        };
                    }
                }
            };
        }
    }

    fn is_due(&self) -> bool {
        if self.state.first_tick {
            return true;
        }
        // A deadline past `Duration::MAX` is never due.
        self.state.previous_fire.is_none_or(|previous| {
            previous
                .checked_add(self.config.period)
                .is_some_and(|due| due <= self.clock.now())
        })
    }

    /// Count the attempt about to run; false when it would exceed the bound.
    fn reserve_repetition(&mut self) -> bool {
        self.state.current_repetition += 1;
        if self
            .config
            .max_repetitions
            .is_some_and(|max| self.state.current_repetition > max)
        {
            self.state.current_repetition -= 1;
            return false;
        }
        true
    }

    fn release_repetition(&mut self) {
        self.state.current_repetition = self.state.current_repetition.saturating_sub(1);
    }
}
