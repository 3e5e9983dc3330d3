//! cadence-core - drift-corrected periodic execution.
//!
//! # Architecture
//!
//! ```text
//! cadence-core/src/
//! ├── lib.rs          # Re-exports (this file)
//! ├── error.rs        # ScheduleError, StepError
//! ├── clock.rs        # Clock trait, SystemClock, ManualClock
//! ├── engine/         # PeriodicRunner, ScheduleConfig, RetryPolicy
//! ├── generators/     # Counter, Timestamps, PerfectSquares, Lcg, zip_lanes
//! └── record.rs       # Datum and the four-lane stream
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use cadence_core::{PeriodicRunner, RetryPolicy, ScheduleConfig};
//!
//! let config = ScheduleConfig::every(Duration::from_secs(300))
//!     .with_max_repetitions(10)
//!     .with_retry(RetryPolicy::new().retry_kind("upload"));
//! let mut runner = PeriodicRunner::new(config)?;
//! while !runner.run_once(|| upload(&payload))?.is_done() {}
//! ```

mod clock;
mod engine;
mod error;
pub mod generators;
mod record;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{
    DEFAULT_RESOLUTION, FailureKind, Phase, PeriodicRunner, RetryCause, RetryPolicy,
    ScheduleConfig, ScheduleState, Tick, secs_to_duration,
};
pub use error::{ScheduleError, StepError};
pub use record::{Datum, datum_stream, datum_stream_from};
