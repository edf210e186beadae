//! Decomposition of caller-side wall time over many timed calls.
//!
//! [`AggregateTiming`] accumulates the internal samples returned by the
//! native layer alongside the wall time the caller measured around the
//! whole loop. Overhead is derived, never measured directly.

use crate::timing::TimingSample;

/// Totals accumulated over a run of timed calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateTiming {
    /// Number of calls recorded.
    pub calls: u64,
    /// Caller-measured span enclosing all calls, in nanoseconds.
    pub wall_ns: u64,
    /// Sum of all internal samples, in nanoseconds.
    pub internal_ns: u64,
}

/// Percentage of wall time attributed to each side of the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Shares {
    /// Share spent inside the native computation.
    pub internal_pct: f64,
    /// Share attributed to the boundary crossing.
    pub overhead_pct: f64,
}

impl AggregateTiming {
    /// An empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one internal sample.
    #[inline]
    pub fn record(&mut self, sample: TimingSample) {
        self.calls += 1;
        self.internal_ns = self.internal_ns.saturating_add(sample.as_nanos());
    }

    /// Set the caller-side span that enclosed every recorded call.
    pub fn set_wall(&mut self, wall: TimingSample) {
        self.wall_ns = wall.as_nanos();
    }

    /// Wall time minus internal time. Negative only through clock skew or
    /// noise.
    pub fn overhead_ns(&self) -> i64 {
        let diff = self.wall_ns as i128 - self.internal_ns as i128;
        diff.clamp(i64::MIN as i128, i64::MAX as i128) as i64
    }

    /// Whether internal time does not exceed wall time by more than
    /// `epsilon_ns`.
    pub fn within_skew(&self, epsilon_ns: u64) -> bool {
        self.internal_ns <= self.wall_ns.saturating_add(epsilon_ns)
    }

    /// Whether the derived overhead is negative, i.e. dominated by noise.
    pub fn is_noise_dominated(&self) -> bool {
        self.internal_ns > self.wall_ns
    }

    /// Mean wall time per call. Zero when no calls were recorded.
    pub fn avg_wall_ns(&self) -> f64 {
        per_call(self.wall_ns as f64, self.calls)
    }

    /// Mean internal time per call.
    pub fn avg_internal_ns(&self) -> f64 {
        per_call(self.internal_ns as f64, self.calls)
    }

    /// Mean overhead per call; may be negative.
    pub fn avg_overhead_ns(&self) -> f64 {
        per_call(self.overhead_ns() as f64, self.calls)
    }

    /// Split wall time into internal and overhead percentages.
    ///
    /// Both shares are 0% when no wall time elapsed. When internal time
    /// reaches or exceeds wall time the overhead is reported as 0% and
    /// the computation as 100%, so the shares never sum past 100%.
    pub fn shares(&self) -> Shares {
        if self.wall_ns == 0 {
            return Shares::default();
        }
        if self.internal_ns >= self.wall_ns {
            return Shares {
                internal_pct: 100.0,
                overhead_pct: 0.0,
            };
        }
        let wall = self.wall_ns as f64;
        let internal_pct = self.internal_ns as f64 / wall * 100.0;
        Shares {
            internal_pct,
            overhead_pct: 100.0 - internal_pct,
        }
    }
}

fn per_call(total: f64, calls: u64) -> f64 {
    if calls == 0 {
        0.0
    } else {
        total / calls as f64
    }
}
