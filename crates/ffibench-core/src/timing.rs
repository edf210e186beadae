//! The timed-variant wrapper: result plus internal duration, from one call.

use crate::clock::{Clock, MonotonicClock};
use crate::compute::{sum_list_of_floats, FloatSeq};
use crate::error::ComputeError;

/// Nanoseconds measured strictly around a computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimingSample(u64);

impl TimingSample {
    /// The zero-length sample.
    pub const ZERO: TimingSample = TimingSample(0);

    /// Duration between two clock readings.
    ///
    /// An `end` earlier than `start` clamps to zero rather than failing.
    #[inline]
    pub fn between(start_ns: u64, end_ns: u64) -> Self {
        Self(end_ns.saturating_sub(start_ns))
    }

    /// Construct from a raw nanosecond count.
    pub const fn from_nanos(ns: u64) -> Self {
        Self(ns)
    }

    /// Raw nanosecond count.
    pub const fn as_nanos(self) -> u64 {
        self.0
    }
}

/// A computation result and the internal duration of the same invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedOutcome<T> {
    /// The computed value.
    pub value: T,
    /// Time spent inside the computation.
    pub elapsed: TimingSample,
}

/// Run `f` between two readings of `clock`.
///
/// Only `f` sits inside the bracket: anything the caller does to prepare
/// arguments or encode the outcome is excluded. If `f` fails, the error is
/// returned as-is and no sample is produced.
#[inline]
pub fn timed<C, T, E, F>(clock: &C, f: F) -> Result<TimedOutcome<T>, E>
where
    C: Clock + ?Sized,
    F: FnOnce() -> Result<T, E>,
{
    let start = clock.now_ns();
    let result = f();
    let end = clock.now_ns();
    let value = result?;
    Ok(TimedOutcome {
        value,
        elapsed: TimingSample::between(start, end),
    })
}

/// [`sum_list_of_floats`] timed with the process-wide [`MonotonicClock`].
pub fn sum_list_of_floats_with_timing(
    values: FloatSeq<'_>,
) -> Result<TimedOutcome<f64>, ComputeError> {
    sum_list_of_floats_with_clock(MonotonicClock::shared(), values)
}

/// [`sum_list_of_floats`] timed with a caller-supplied clock.
pub fn sum_list_of_floats_with_clock<C: Clock + ?Sized>(
    clock: &C,
    values: FloatSeq<'_>,
) -> Result<TimedOutcome<f64>, ComputeError> {
    timed(clock, || sum_list_of_floats(values))
}
