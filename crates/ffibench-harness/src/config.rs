//! Benchmark configuration and validation.
//!
//! [`BenchConfig`] fixes every iteration count and input size before the
//! harness is built; nothing is adjusted while a run is in progress.

use std::error::Error;
use std::fmt;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`BenchConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// An iteration count is zero.
    ZeroIterations {
        /// Name of the offending field.
        field: &'static str,
    },
    /// Resolution measurement would take no clock readings.
    ZeroResolutionReads,
    /// `max_clock_resolution_ns` is zero, which no clock can satisfy.
    ZeroResolutionLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroIterations { field } => write!(f, "{field} must be at least 1"),
            Self::ZeroResolutionReads => write!(f, "resolution_reads must be at least 1"),
            Self::ZeroResolutionLimit => {
                write!(f, "max_clock_resolution_ns must be at least 1")
            }
        }
    }
}

impl Error for ConfigError {}

// ── BenchConfig ────────────────────────────────────────────────────

/// Fixed parameters of one benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchConfig {
    /// Calls per path in the scalar scenario. Default: 1 000 000.
    pub simple_iterations: u64,
    /// Calls per path in the bulk and decomposition scenarios. Default: 1 000.
    pub bulk_iterations: u64,
    /// Length of the shared float input `[0.0, 1.0, ..]`. Default: 100 000.
    pub list_size: usize,
    /// Left operand of the scalar scenario. Default: 10.
    pub scalar_a: i64,
    /// Right operand of the scalar scenario. Default: 20.
    pub scalar_b: i64,
    /// Coarsest clock tick accepted for the scalar scenario. Default: 1 000 ns.
    pub max_clock_resolution_ns: u64,
    /// How far internal time may exceed wall time before the
    /// decomposition is rejected as a measurement bug. Default: 1 000 ns.
    pub skew_tolerance_ns: u64,
    /// Consecutive clock reads used to estimate resolution. Default: 10 000.
    pub resolution_reads: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            simple_iterations: 1_000_000,
            bulk_iterations: 1_000,
            list_size: 100_000,
            scalar_a: 10,
            scalar_b: 20,
            max_clock_resolution_ns: 1_000,
            skew_tolerance_ns: 1_000,
            resolution_reads: 10_000,
        }
    }
}

impl BenchConfig {
    /// Check structural invariants.
    ///
    /// Operand overflow is deliberately not checked here: it surfaces from
    /// the first scalar call, like any other computation failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simple_iterations == 0 {
            return Err(ConfigError::ZeroIterations {
                field: "simple_iterations",
            });
        }
        if self.bulk_iterations == 0 {
            return Err(ConfigError::ZeroIterations {
                field: "bulk_iterations",
            });
        }
        if self.resolution_reads == 0 {
            return Err(ConfigError::ZeroResolutionReads);
        }
        if self.max_clock_resolution_ns == 0 {
            return Err(ConfigError::ZeroResolutionLimit);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        BenchConfig::default().validate().unwrap();
    }

    #[test]
    fn defaults_match_benchmark_constants() {
        let c = BenchConfig::default();
        assert_eq!(c.simple_iterations, 1_000_000);
        assert_eq!(c.bulk_iterations, 1_000);
        assert_eq!(c.list_size, 100_000);
        assert_eq!((c.scalar_a, c.scalar_b), (10, 20));
    }

    #[test]
    fn zero_iterations_rejected() {
        let c = BenchConfig {
            simple_iterations: 0,
            ..BenchConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::ZeroIterations {
                field: "simple_iterations"
            })
        );

        let c = BenchConfig {
            bulk_iterations: 0,
            ..BenchConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(ConfigError::ZeroIterations {
                field: "bulk_iterations"
            })
        );
    }

    #[test]
    fn empty_input_is_allowed() {
        let c = BenchConfig {
            list_size: 0,
            ..BenchConfig::default()
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn reads_and_limit_must_be_positive() {
        let c = BenchConfig {
            resolution_reads: 0,
            ..BenchConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroResolutionReads));

        let c = BenchConfig {
            max_clock_resolution_ns: 0,
            ..BenchConfig::default()
        };
        assert_eq!(c.validate(), Err(ConfigError::ZeroResolutionLimit));
    }
}
