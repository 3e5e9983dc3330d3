//! Periodic execution engine: drift-corrected firing, bounded repetitions and
//! transparent retry of transient outcomes.

mod config;
mod retry;
mod runner;
mod state;

pub use config::{DEFAULT_RESOLUTION, ScheduleConfig, secs_to_duration};
pub use retry::{FailureKind, RetryCause, RetryPolicy};
pub use runner::{PeriodicRunner, Tick};
pub use state::{Phase, ScheduleState};
