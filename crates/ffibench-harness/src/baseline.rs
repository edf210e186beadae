//! Caller-side reference implementations.
//!
//! The same logic as the native payloads, written on the caller's side of
//! the boundary. Scenario A and B time these against a [`NativeBackend`]
//! to expose the cost of crossing over.
//!
//! [`NativeBackend`]: crate::backend::NativeBackend

use ffibench_core::ComputeError;

/// Add two integers without crossing the boundary.
#[inline(never)]
pub fn sum_as_i64(a: i64, b: i64) -> Result<i64, ComputeError> {
    a.checked_add(b).ok_or(ComputeError::IntegerOverflow { a, b })
}

/// Left-to-right float sum without crossing the boundary.
///
/// Input validation is the harness's job: the shared input is checked once
/// at construction, so this loop carries no per-call scan.
#[inline(never)]
pub fn sum_list_of_floats(values: &[f64]) -> f64 {
    let mut acc = 0.0;
    for &v in values {
        acc += v;
    }
    acc
}
