//! Test utilities and mock types for ffibench development.
//!
//! Provides deterministic [`Clock`] implementations ([`StepClock`],
//! [`ScriptedClock`]) and a [`ScriptedBackend`] whose native timings and
//! results are fixed in advance, so harness arithmetic can be checked
//! exactly.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::Cell;

use ffibench_core::{Clock, ComputeError, FloatSeq, TimedOutcome, TimingSample};
use ffibench_harness::{BenchError, NativeBackend};

/// Clock that advances by a fixed step on every read.
///
/// The first read returns the start value. A step of zero gives a frozen
/// clock.
pub struct StepClock {
    now: Cell<u64>,
    step: u64,
    reads: Cell<u64>,
}

impl StepClock {
    pub fn new(start: u64, step: u64) -> Self {
        Self {
            now: Cell::new(start),
            step,
            reads: Cell::new(0),
        }
    }

    /// A clock that never advances.
    pub fn frozen(at: u64) -> Self {
        Self::new(at, 0)
    }

    /// Number of reads so far.
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }
}

impl Clock for StepClock {
    fn now_ns(&self) -> u64 {
        let t = self.now.get();
        self.now.set(t.saturating_add(self.step));
        self.reads.set(self.reads.get() + 1);
        t
    }
}

/// Clock that replays a fixed sequence of readings.
///
/// Once the script runs out the last reading repeats forever; an empty
/// script reads as zero.
pub struct ScriptedClock {
    readings: Vec<u64>,
    next: Cell<usize>,
}

impl ScriptedClock {
    pub fn new(readings: Vec<u64>) -> Self {
        Self {
            readings,
            next: Cell::new(0),
        }
    }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.readings.len().saturating_sub(self.next.get())
    }
}

impl Clock for ScriptedClock {
    fn now_ns(&self) -> u64 {
        let i = self.next.get();
        self.next.set(i + 1);
        self.readings
            .get(i)
            .or(self.readings.last())
            .copied()
            .unwrap_or(0)
    }
}

/// How a [`ScriptedBackend`] answers.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    /// Compute the real result.
    Correct,
    /// Return a result off by one.
    WrongResult,
    /// Fail every call with this native status.
    Fail { code: i32 },
}

/// Backend with a fixed internal duration per timed call.
///
/// Results are computed with the real `ffibench-core` functions unless
/// the [`Behavior`] says otherwise.
pub struct ScriptedBackend {
    internal_ns: u64,
    behavior: Behavior,
    calls: Cell<u64>,
}

impl ScriptedBackend {
    /// Correct results, `internal_ns` per timed call.
    pub fn new(internal_ns: u64) -> Self {
        Self::with_behavior(internal_ns, Behavior::Correct)
    }

    pub fn with_behavior(internal_ns: u64, behavior: Behavior) -> Self {
        Self {
            internal_ns,
            behavior,
            calls: Cell::new(0),
        }
    }

    /// Calls across all three entry points.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }

    fn enter(&self) -> Result<(), BenchError> {
        self.calls.set(self.calls.get() + 1);
        match self.behavior {
            Behavior::Fail { code } => Err(BenchError::Native {
                code,
                detail: "scripted failure".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn sum(&self, values: &[f64]) -> Result<f64, ComputeError> {
        let sum = ffibench_core::sum_list_of_floats(FloatSeq::new(values)?)?;
        Ok(match self.behavior {
            Behavior::WrongResult => sum + 1.0,
            _ => sum,
        })
    }
}

impl NativeBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn sum_as_i64(&self, a: i64, b: i64) -> Result<i64, BenchError> {
        self.enter()?;
        let sum = ffibench_core::sum_as_i64(a, b)?;
        Ok(match self.behavior {
            Behavior::WrongResult => sum.wrapping_add(1),
            _ => sum,
        })
    }

    fn sum_list_of_floats(&self, values: &[f64]) -> Result<f64, BenchError> {
        self.enter()?;
        Ok(self.sum(values)?)
    }

    fn sum_list_of_floats_with_timing(
        &self,
        values: &[f64],
    ) -> Result<TimedOutcome<f64>, BenchError> {
        self.enter()?;
        Ok(TimedOutcome {
            value: self.sum(values)?,
            elapsed: TimingSample::from_nanos(self.internal_ns),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_clock_advances_per_read() {
        let c = StepClock::new(100, 5);
        assert_eq!(c.now_ns(), 100);
        assert_eq!(c.now_ns(), 105);
        assert_eq!(c.reads(), 2);
        let f = StepClock::frozen(7);
        assert_eq!((f.now_ns(), f.now_ns()), (7, 7));
    }

    #[test]
    fn scripted_clock_repeats_last() {
        let c = ScriptedClock::new(vec![10, 3]);
        assert_eq!(c.now_ns(), 10);
        assert_eq!(c.now_ns(), 3);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.now_ns(), 3);
        assert_eq!(ScriptedClock::new(Vec::new()).now_ns(), 0);
    }

    #[test]
    fn scripted_backend_behaviors() {
        let ok = ScriptedBackend::new(50);
        let out = ok.sum_list_of_floats_with_timing(&[1.0, 2.0]).unwrap();
        assert_eq!(out.value, 3.0);
        assert_eq!(out.elapsed.as_nanos(), 50);
        assert_eq!(ok.calls(), 1);

        let wrong = ScriptedBackend::with_behavior(0, Behavior::WrongResult);
        assert_eq!(wrong.sum_as_i64(10, 20).unwrap(), 31);

        let failing = ScriptedBackend::with_behavior(0, Behavior::Fail { code: -3 });
        assert!(matches!(
            failing.sum_list_of_floats(&[]),
            Err(BenchError::Native { code: -3, .. })
        ));
    }
}
