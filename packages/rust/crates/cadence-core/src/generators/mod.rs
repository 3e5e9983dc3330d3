//! Lazy sequence generators and pointwise pairing.
//!
//! Every generator is an [`Iterator`] owning only its own recurrence state.
//! Infinite generators never return `None`; only the bounded counter and
//! overflow guards end a sequence.

mod counter;
mod lanes;
mod lcg;
mod squares;
mod timestamps;

pub use counter::Counter;
pub use lanes::{ZipLanes, zip_lanes};
pub use lcg::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, Lcg};
pub use squares::PerfectSquares;
pub use timestamps::{Timestamps, unix_now};
