use std::time::Duration;

use crate::error::ScheduleError;

use super::retry::RetryPolicy;

/// Default pause between clock checks while waiting for the next fire.
pub const DEFAULT_RESOLUTION: Duration = Duration::from_millis(100);

/// Immutable configuration for one [`super::PeriodicRunner`].
#[derive(Debug, Clone)]
pub struct ScheduleConfig<T> {
    /// Target interval between accepted invocations.
    pub period: Duration,
    /// Sleep between clock checks while idle; bounds lateness of each fire.
    pub resolution: Duration,
    /// Accepted invocations allowed over the runner's lifetime; `None` is unbounded.
    pub max_repetitions: Option<u64>,
    /// Outcomes that are re-attempted instead of accepted.
    pub retry: RetryPolicy<T>,
}

impl<T> ScheduleConfig<T> {
    /// Fire every `period`, default resolution, unbounded, no retries.
    #[must_use]
    pub fn every(period: Duration) -> Self {
        Self {
            period,
            resolution: DEFAULT_RESOLUTION,
            max_repetitions: None,
            retry: RetryPolicy::new(),
        }
    }

    /// Same as [`Self::every`] with a fractional number of seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidSeconds`] for negative, NaN or
    /// out-of-range input.
    pub fn every_secs_f64(seconds: f64) -> Result<Self, ScheduleError> {
        Ok(Self::every(secs_to_duration(seconds)?))
    }

    /// Override the poll resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Duration) -> Self {
        self.resolution = resolution;
        self
    }

    /// Bound the number of accepted invocations.
    #[must_use]
    pub fn with_max_repetitions(mut self, max_repetitions: u64) -> Self {
        self.max_repetitions = Some(max_repetitions);
        self
    }

    /// Replace the retry classification.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy<T>) -> Self {
        self.retry = retry;
        self
    }

    /// Check period and resolution are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] when either interval is zero.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.period.is_zero() {
            return Err(ScheduleError::NonPositivePeriod(self.period));
        }
        if self.resolution.is_zero() {
            return Err(ScheduleError::NonPositiveResolution(self.resolution));
        }
        Ok(())
    }
}

/// Convert fractional seconds into a `Duration`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidSeconds`] for negative, NaN or
/// out-of-range input.
pub fn secs_to_duration(seconds: f64) -> Result<Duration, ScheduleError> {
    Duration::try_from_secs_f64(seconds).map_err(|_| ScheduleError::InvalidSeconds(seconds.to_string()))
}
