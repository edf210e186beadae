//! Scenario orchestration.
//!
//! A [`Harness`] is built once from a validated [`BenchConfig`]: the
//! shared input is materialized and the clock resolution measured at
//! construction, so every scenario sees the same fixed parameters. Each scenario makes one
//! verification call against the caller-side baseline, then times its
//! loops with the harness clock.

use std::hint::black_box;

use ffibench_core::{measure_resolution, AggregateTiming, Clock, FloatSeq, TimingSample};

use crate::backend::NativeBackend;
use crate::baseline;
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::report::{BenchReport, BulkReport, DecompositionReport, ScalarReport};

/// Which scenarios a run executes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scenario {
    /// A, B and C in order.
    #[default]
    All,
    /// Scalar add only.
    Scalar,
    /// Bulk sum only.
    Bulk,
    /// Timed-call decomposition only.
    Decomposition,
}

impl Scenario {
    fn includes(self, other: Scenario) -> bool {
        self == Scenario::All || self == other
    }
}

/// Build the shared input `[0.0, 1.0, .., len - 1]`.
pub fn build_input(len: usize) -> Vec<f64> {
    (0..len).map(|i| i as f64).collect()
}

/// Benchmark driver over one backend and one clock.
pub struct Harness<B, C> {
    config: BenchConfig,
    backend: B,
    clock: C,
    input: Vec<f64>,
    clock_resolution_ns: Option<u64>,
}

impl<B: NativeBackend, C: Clock> Harness<B, C> {
    /// Validate `config`, build the shared input and measure the resolution of `clock`.
    pub fn new(config: BenchConfig, backend: B, clock: C) -> Result<Self, BenchError> {
        config.validate()?;
        let input = build_input(config.list_size);
        FloatSeq::new(&input)?;
        let clock_resolution_ns = measure_resolution(&clock, config.resolution_reads);
        Ok(Self {
            config,
            backend,
            clock,
            input,
            clock_resolution_ns,
        })
    }

    /// The shared input sequence.
    pub fn input(&self) -> &[f64] {
        &self.input
    }

    /// Smallest clock tick observed at construction.
    pub fn clock_resolution_ns(&self) -> Option<u64> {
        self.clock_resolution_ns
    }

    /// Run the selected scenarios in order.
    ///
    /// Any failure aborts the run, with one exception: under
    /// [`Scenario::All`] a clock too coarse for the scalar scenario skips
    /// it with a warning and the bulk scenarios still run. Asking for
    /// [`Scenario::Scalar`] alone on such a clock is an error.
    pub fn run(&self, scenario: Scenario) -> Result<BenchReport, BenchError> {
        let scalar = match scenario {
            Scenario::Scalar => Some(self.run_scalar()?),
            Scenario::All => match self.run_scalar() {
                Err(e @ BenchError::CoarseClock { .. }) => {
                    eprintln!("ffibench: warning: skipping scalar scenario: {e}");
                    None
                }
                other => Some(other?),
            },
            Scenario::Bulk | Scenario::Decomposition => None,
        };
        let bulk = if scenario.includes(Scenario::Bulk) {
            Some(self.run_bulk()?)
        } else {
            None
        };
        let decomposition = if scenario.includes(Scenario::Decomposition) {
            Some(self.run_decomposition()?)
        } else {
            None
        };
        Ok(BenchReport {
            backend: self.backend.name(),
            simple_iterations: self.config.simple_iterations,
            bulk_iterations: self.config.bulk_iterations,
            list_size: self.config.list_size,
            clock_resolution_ns: self.clock_resolution_ns,
            scalar,
            bulk,
            decomposition,
        })
    }

    fn elapsed_since(&self, start_ns: u64) -> TimingSample {
        let end_ns = self.clock.now_ns();
        if end_ns < start_ns {
            eprintln!(
                "ffibench: warning: clock went backwards by {} ns, sample clamped to 0",
                start_ns - end_ns
            );
        }
        TimingSample::between(start_ns, end_ns)
    }

    fn require_fine_clock(&self) -> Result<(), BenchError> {
        let limit_ns = self.config.max_clock_resolution_ns;
        match self.clock_resolution_ns {
            Some(ns) if ns <= limit_ns => Ok(()),
            resolution_ns => Err(BenchError::CoarseClock {
                resolution_ns,
                limit_ns,
            }),
        }
    }

    /// Scenario A: scalar add, baseline against native.
    pub fn run_scalar(&self) -> Result<ScalarReport, BenchError> {
        self.require_fine_clock()?;
        let (a, b) = (self.config.scalar_a, self.config.scalar_b);
        let n = self.config.simple_iterations;

        let expected = baseline::sum_as_i64(a, b)?;
        let mismatch = |native: i64| BenchError::ResultMismatch {
            scenario: "scalar",
            baseline: expected.to_string(),
            native: native.to_string(),
        };
        let check = self.backend.sum_as_i64(a, b)?;
        if check != expected {
            return Err(mismatch(check));
        }

        let start = self.clock.now_ns();
        for _ in 0..n {
            let r = baseline::sum_as_i64(black_box(a), black_box(b))?;
            black_box(r);
        }
        let baseline_time = self.elapsed_since(start);

        let start = self.clock.now_ns();
        for _ in 0..n {
            let r = self.backend.sum_as_i64(black_box(a), black_box(b))?;
            if r != expected {
                return Err(mismatch(r));
            }
        }
        let native_time = self.elapsed_since(start);

        Ok(ScalarReport {
            iterations: n,
            a,
            b,
            result: expected,
            baseline: baseline_time,
            native: native_time,
        })
    }

    /// Scenario B: bulk sum, baseline against native.
    pub fn run_bulk(&self) -> Result<BulkReport, BenchError> {
        let n = self.config.bulk_iterations;
        let input = self.input.as_slice();

        let expected = baseline::sum_list_of_floats(input);
        verify_sum("bulk", expected, self.backend.sum_list_of_floats(input)?)?;

        let start = self.clock.now_ns();
        for _ in 0..n {
            black_box(baseline::sum_list_of_floats(black_box(input)));
        }
        let baseline_time = self.elapsed_since(start);

        let start = self.clock.now_ns();
        for _ in 0..n {
            let r = self.backend.sum_list_of_floats(black_box(input))?;
            black_box(r);
        }
        let native_time = self.elapsed_since(start);

        Ok(BulkReport {
            iterations: n,
            list_size: input.len(),
            result: expected,
            baseline: baseline_time,
            native: native_time,
        })
    }

    /// Scenario C: split wall time over timed calls into native work and
    /// boundary overhead.
    pub fn run_decomposition(&self) -> Result<DecompositionReport, BenchError> {
        let n = self.config.bulk_iterations;
        let input = self.input.as_slice();

        let expected = baseline::sum_list_of_floats(input);
        let check = self.backend.sum_list_of_floats_with_timing(input)?;
        verify_sum("decomposition", expected, check.value)?;

        let mut timing = AggregateTiming::new();
        let mut last = check.value;
        let start = self.clock.now_ns();
        for _ in 0..n {
            let out = self.backend.sum_list_of_floats_with_timing(black_box(input))?;
            timing.record(out.elapsed);
            last = out.value;
        }
        timing.set_wall(self.elapsed_since(start));
        verify_sum("decomposition", expected, last)?;

        let tolerance_ns = self.config.skew_tolerance_ns;
        if !timing.within_skew(tolerance_ns) {
            return Err(BenchError::ExcessiveSkew {
                internal_ns: timing.internal_ns,
                wall_ns: timing.wall_ns,
                tolerance_ns,
            });
        }
        if timing.is_noise_dominated() {
            eprintln!(
                "ffibench: warning: internal time exceeds wall time by {} ns; \
                 overhead is below measurement noise",
                timing.internal_ns - timing.wall_ns
            );
        }

        Ok(DecompositionReport {
            list_size: input.len(),
            result: last,
            timing,
        })
    }
}

/// Sums must agree bit for bit: both sides accumulate in the same order.
fn verify_sum(scenario: &'static str, expected: f64, native: f64) -> Result<(), BenchError> {
    if native.to_bits() == expected.to_bits() {
        Ok(())
    } else {
        Err(BenchError::ResultMismatch {
            scenario,
            baseline: expected.to_string(),
            native: native.to_string(),
        })
    }
}
