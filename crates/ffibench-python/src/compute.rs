//! Python-facing computation functions.
//!
//! Each function extracts its arguments with PyO3 (raising `TypeError` or
//! `OverflowError` for unusable Python objects), crosses into the C entry
//! points of `ffibench-ffi`, and converts the status back into a result or
//! a Python exception. The list variants copy into a `Vec<f64>`; the array
//! variants borrow a contiguous NumPy buffer in place.

use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use ffibench_ffi::{
    ffibench_sum_as_i64, ffibench_sum_list_of_floats, ffibench_sum_list_of_floats_with_timing,
    FfiTimedSum,
};

use crate::error::check_status;

/// Add two integers in native code.
///
/// Raises:
///     OverflowError: If an operand or the sum does not fit in 64 bits.
#[pyfunction]
pub(crate) fn sum_as_i64(a: i64, b: i64) -> PyResult<i64> {
    let mut out = 0i64;
    check_status(ffibench_sum_as_i64(a, b, &mut out))?;
    Ok(out)
}

/// Sum a sequence of floats left to right in native code.
///
/// Raises:
///     TypeError: If an element is not a number.
///     ValueError: If an element is NaN or infinite.
#[pyfunction]
pub(crate) fn sum_list_of_floats(values: Vec<f64>) -> PyResult<f64> {
    sum_slice(&values)
}

/// Sum a sequence of floats and return `(sum, elapsed_ns)`.
///
/// `elapsed_ns` covers only the native summation; list conversion and
/// tuple construction are excluded.
#[pyfunction]
pub(crate) fn sum_list_of_floats_with_timing(values: Vec<f64>) -> PyResult<(f64, u64)> {
    sum_slice_with_timing(&values)
}

/// Sum a 1-D float64 NumPy array without copying it.
///
/// Raises:
///     ValueError: If the array is not contiguous or holds non-finite values.
#[pyfunction]
pub(crate) fn sum_array_of_floats(values: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    sum_slice(contiguous(&values)?)
}

/// Zero-copy counterpart of `sum_list_of_floats_with_timing`.
#[pyfunction]
pub(crate) fn sum_array_of_floats_with_timing(
    values: PyReadonlyArray1<'_, f64>,
) -> PyResult<(f64, u64)> {
    sum_slice_with_timing(contiguous(&values)?)
}

fn contiguous<'a>(values: &'a PyReadonlyArray1<'_, f64>) -> PyResult<&'a [f64]> {
    values
        .as_slice()
        .map_err(|_| PyValueError::new_err("values must be a contiguous 1-D float64 array"))
}

fn sum_slice(values: &[f64]) -> PyResult<f64> {
    let mut out = 0.0;
    check_status(ffibench_sum_list_of_floats(values.as_ptr(), values.len(), &mut out))?;
    Ok(out)
}

fn sum_slice_with_timing(values: &[f64]) -> PyResult<(f64, u64)> {
    let mut out = FfiTimedSum::default();
    check_status(ffibench_sum_list_of_floats_with_timing(
        values.as_ptr(),
        values.len(),
        &mut out,
    ))?;
    Ok((out.sum, out.elapsed_ns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_add() {
        assert_eq!(sum_as_i64(10, 20).unwrap(), 30);
    }

    #[test]
    fn empty_slice_sums_to_zero() {
        assert_eq!(sum_slice(&[]).unwrap(), 0.0);
        let (sum, _elapsed) = sum_slice_with_timing(&[]).unwrap();
        assert_eq!(sum, 0.0);
    }

    #[test]
    fn timed_and_plain_agree() {
        let values: Vec<f64> = (0..100_000).map(|i| i as f64).collect();
        let plain = sum_list_of_floats(values.clone()).unwrap();
        let (timed, _elapsed) = sum_list_of_floats_with_timing(values).unwrap();
        assert_eq!(plain, 4_999_950_000.0);
        assert_eq!(timed.to_bits(), plain.to_bits());
    }
}
