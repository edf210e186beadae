//! C-compatible status codes.
//!
//! [`FfiStatus`] is a `repr(i32)` enum returned by every entry point.
//! `Ok` is zero and every failure is negative; values are ABI-stable.

use ffibench_core::ComputeError;

/// C-compatible status code returned by all FFI functions.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FfiStatus {
    /// Success.
    Ok = 0,
    /// Integer addition left the `i64` range.
    IntegerOverflow = -1,
    /// An input element is NaN or infinite.
    NonFiniteInput = -2,
    /// A pointer argument is null where a value is required.
    InvalidArgument = -3,
    /// Finite inputs summed to a non-finite value.
    NonFiniteSum = -4,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl FfiStatus {
    /// Map a raw code back to a status; unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Ok),
            -1 => Some(Self::IntegerOverflow),
            -2 => Some(Self::NonFiniteInput),
            -3 => Some(Self::InvalidArgument),
            -4 => Some(Self::NonFiniteSum),
            -128 => Some(Self::Panicked),
            _ => None,
        }
    }
}

impl From<&ComputeError> for FfiStatus {
    fn from(e: &ComputeError) -> Self {
        match e {
            ComputeError::IntegerOverflow { .. } => FfiStatus::IntegerOverflow,
            ComputeError::NonFiniteInput { .. } => FfiStatus::NonFiniteInput,
            ComputeError::NonFiniteSum { .. } => FfiStatus::NonFiniteSum,
        }
    }
}
