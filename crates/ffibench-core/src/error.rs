//! Error types for the native computation layer.
//!
//! Covers both argument decoding (rejected before any timing starts) and
//! failures of the computation itself.

use std::error::Error;
use std::fmt;

/// Errors from a native computation or from decoding its arguments.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputeError {
    /// `a + b` does not fit in an `i64`.
    IntegerOverflow {
        /// Left operand.
        a: i64,
        /// Right operand.
        b: i64,
    },
    /// An input element is NaN or infinite. Detected while decoding the
    /// argument, so no timing sample exists for the call.
    NonFiniteInput {
        /// Position of the first offending element.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A sequence of finite values accumulated past `f64::MAX`.
    NonFiniteSum {
        /// The non-finite partial sum.
        sum: f64,
    },
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegerOverflow { a, b } => {
                write!(f, "integer overflow: {a} + {b} exceeds the i64 range")
            }
            Self::NonFiniteInput { index, value } => {
                write!(f, "non-finite input {value} at index {index}")
            }
            Self::NonFiniteSum { sum } => {
                write!(f, "sum of finite inputs overflowed to {sum}")
            }
        }
    }
}

impl Error for ComputeError {}
