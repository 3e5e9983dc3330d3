//! Error types for schedule configuration and runner steps.
//!
//! Library crates use `thiserror` for explicit error enums.

use std::time::Duration;

use thiserror::Error;

/// Invalid schedule configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Period must be strictly positive.
    #[error("schedule period must be positive, got {0:?}")]
    NonPositivePeriod(Duration),

    /// Poll resolution must be strictly positive.
    #[error("poll resolution must be positive, got {0:?}")]
    NonPositiveResolution(Duration),

    /// Seconds value is negative, NaN or too large for a `Duration`.
    #[error("invalid number of seconds: {0}")]
    InvalidSeconds(String),
}

/// Failure surfaced by [`crate::PeriodicRunner::run_once`].
#[derive(Debug, Error)]
pub enum StepError<E>
where
    E: std::error::Error + 'static,
{
    /// The operation failed with a kind outside the retry set.
    #[error("operation failed without a retry classification")]
    Operation(#[source] E),

    /// A previous step already propagated an unretried failure.
    #[error("runner halted after an unretried operation failure")]
    Halted,
}

impl<E> StepError<E>
where
    E: std::error::Error + 'static,
{
    /// The operation's own error, if this step invoked it.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(error) => Some(error),
            Self::Halted => None,
        }
    }
}
