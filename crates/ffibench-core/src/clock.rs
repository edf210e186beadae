//! Monotonic clock source shared by the native layer and the harness.
//!
//! Every [`MonotonicClock`] handed out by [`MonotonicClock::shared`] reads
//! nanoseconds from the same process-wide origin, so internal samples taken
//! inside a native call and wall-time samples taken by the caller live in one
//! clock domain.

use std::sync::OnceLock;
use std::time::Instant;

/// A source of monotonic nanosecond timestamps.
///
/// Implementations must be non-decreasing across consecutive reads. Callers
/// still clamp negative differences to zero (see
/// [`TimingSample::between`](crate::TimingSample::between)), since a
/// violation is an environment quirk rather than a program defect.
pub trait Clock {
    /// Nanoseconds since a fixed, implementation-defined origin.
    fn now_ns(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ns(&self) -> u64 {
        (**self).now_ns()
    }
}

/// [`Clock`] backed by [`std::time::Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

static SHARED: OnceLock<MonotonicClock> = OnceLock::new();

impl MonotonicClock {
    /// A clock with its origin at the moment of construction.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// The process-wide clock. Its origin is fixed on first use.
    pub fn shared() -> &'static MonotonicClock {
        SHARED.get_or_init(MonotonicClock::new)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now_ns(&self) -> u64 {
        // u64 nanoseconds cover ~584 years of process uptime.
        self.origin.elapsed().as_nanos() as u64
    }
}

/// Estimate the smallest observable tick of `clock`.
///
/// Takes up to `max_reads` consecutive readings and returns the smallest
/// positive difference between neighbours, or `None` if the clock never
/// advanced. A result coarser than roughly a microsecond cannot resolve
/// single scalar calls.
pub fn measure_resolution<C: Clock + ?Sized>(clock: &C, max_reads: usize) -> Option<u64> {
    let mut best: Option<u64> = None;
    let mut prev = clock.now_ns();
    for _ in 0..max_reads {
        let now = clock.now_ns();
        let delta = now.saturating_sub(prev);
        if delta > 0 {
            best = Some(best.map_or(delta, |b| b.min(delta)));
            if delta == 1 {
                break;
            }
        }
        prev = now;
    }
    best
}
