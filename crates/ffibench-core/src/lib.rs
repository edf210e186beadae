//! Native computation payloads and timed-call primitives for ffibench.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! work whose cost is measured across a foreign-function boundary (integer
//! addition, sequential float summation), the monotonic [`Clock`] used to
//! time it, the [`timed`] bracket that returns a result together with its
//! internal duration, and [`AggregateTiming`], which decomposes caller-side
//! wall time into internal and overhead shares.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod clock;
pub mod compute;
pub mod error;
pub mod timing;

pub use aggregate::{AggregateTiming, Shares};
pub use clock::{measure_resolution, Clock, MonotonicClock};
pub use compute::{sum_as_i64, sum_list_of_floats, FloatSeq};
pub use error::ComputeError;
pub use timing::{
    sum_list_of_floats_with_clock, sum_list_of_floats_with_timing, timed, TimedOutcome,
    TimingSample,
};
