//! Harness-level errors.
//!
//! Every variant is terminal for a run: the binary prints it and exits
//! non-zero without reporting partial results.

use std::error::Error;
use std::fmt;

use ffibench_core::ComputeError;

use crate::config::ConfigError;

/// Errors from building or running the harness.
#[derive(Clone, Debug, PartialEq)]
pub enum BenchError {
    /// The configuration failed validation.
    Config(ConfigError),
    /// A computation failed on the caller side or in a direct backend.
    Compute(ComputeError),
    /// A native entry point returned a non-zero status.
    Native {
        /// Raw status code.
        code: i32,
        /// Native-side description of the failure.
        detail: String,
    },
    /// An embedded interpreter raised an exception.
    Interpreter {
        /// Python exception type name.
        exception: String,
        /// Exception message.
        detail: String,
    },
    /// The clock cannot resolve single scalar calls.
    CoarseClock {
        /// Observed resolution; `None` if the clock never advanced.
        resolution_ns: Option<u64>,
        /// Configured limit.
        limit_ns: u64,
    },
    /// The native path disagreed with the caller-side baseline.
    ResultMismatch {
        /// Scenario in which the mismatch occurred.
        scenario: &'static str,
        /// Baseline result.
        baseline: String,
        /// Native result.
        native: String,
    },
    /// Internal time exceeded wall time by more than the tolerance.
    ExcessiveSkew {
        /// Sum of internal samples.
        internal_ns: u64,
        /// Caller-measured wall time.
        wall_ns: u64,
        /// Configured tolerance.
        tolerance_ns: u64,
    },
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Compute(e) => write!(f, "computation failed: {e}"),
            Self::Native { code, detail } => {
                write!(f, "native call failed with status {code}")?;
                if !detail.is_empty() {
                    write!(f, ": {detail}")?;
                }
                Ok(())
            }
            Self::Interpreter { exception, detail } => {
                write!(f, "interpreter raised {exception}: {detail}")
            }
            Self::CoarseClock {
                resolution_ns,
                limit_ns,
            } => match resolution_ns {
                Some(ns) => write!(
                    f,
                    "clock resolution {ns} ns is coarser than the {limit_ns} ns limit; \
                     scalar call timings would be meaningless"
                ),
                None => write!(f, "clock did not advance while probing its resolution"),
            },
            Self::ResultMismatch {
                scenario,
                baseline,
                native,
            } => write!(
                f,
                "{scenario}: native result {native} differs from baseline {baseline}"
            ),
            Self::ExcessiveSkew {
                internal_ns,
                wall_ns,
                tolerance_ns,
            } => write!(
                f,
                "internal time {internal_ns} ns exceeds wall time {wall_ns} ns \
                 by more than {tolerance_ns} ns"
            ),
        }
    }
}

impl Error for BenchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Compute(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for BenchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ComputeError> for BenchError {
    fn from(e: ComputeError) -> Self {
        Self::Compute(e)
    }
}
