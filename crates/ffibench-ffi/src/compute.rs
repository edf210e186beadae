//! Computation entry points: integer add, float sum, timed float sum.
//!
//! Argument decoding (null checks, slice construction, finiteness scan) and
//! result encoding happen outside the timing bracket, so the sample returned
//! by the timed variant covers the summation alone.

use ffibench_core::{
    sum_as_i64, sum_list_of_floats, sum_list_of_floats_with_timing, ComputeError, FloatSeq,
};

use crate::record_error;
use crate::status::FfiStatus;
use crate::types::FfiTimedSum;

/// Turn `(values, len)` into a validated sequence.
///
/// A null pointer is accepted only with `len == 0`.
///
/// # Safety
///
/// A non-null `values` must point to `len` readable, initialized `f64`s that
/// stay unmodified for `'a`.
#[allow(unsafe_code)]
unsafe fn decode_values<'a>(values: *const f64, len: usize) -> Result<FloatSeq<'a>, FfiStatus> {
    let slice: &'a [f64] = if len == 0 {
        &[]
    } else if values.is_null() {
        record_error("values is null but len is non-zero");
        return Err(FfiStatus::InvalidArgument);
    } else {
        // SAFETY: non-null and len elements long per caller contract.
        unsafe { std::slice::from_raw_parts(values, len) }
    };
    FloatSeq::new(slice).map_err(|e| fail(&e))
}

fn fail(e: &ComputeError) -> FfiStatus {
    record_error(e);
    FfiStatus::from(e)
}

/// Add two integers. Writes `a + b` to `out`.
///
/// Returns `IntegerOverflow` without touching `out` if the sum does not
/// fit in 64 bits.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffibench_sum_as_i64(a: i64, b: i64, out: *mut i64) -> i32 {
    ffi_guard!({
        if out.is_null() {
            record_error("out is null");
            return FfiStatus::InvalidArgument as i32;
        }
        match sum_as_i64(a, b) {
            Ok(sum) => {
                // SAFETY: out is non-null and writable per caller contract.
                unsafe { *out = sum };
                FfiStatus::Ok as i32
            }
            Err(e) => fail(&e) as i32,
        }
    })
}

/// Sum `len` doubles starting at `values` left to right. Writes the sum
/// to `out`.
///
/// `values` may be null when `len` is zero; the empty sum is `0.0`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffibench_sum_list_of_floats(
    values: *const f64,
    len: usize,
    out: *mut f64,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            record_error("out is null");
            return FfiStatus::InvalidArgument as i32;
        }
        // SAFETY: values/len describe a caller-owned buffer.
        let seq = match unsafe { decode_values(values, len) } {
            Ok(seq) => seq,
            Err(status) => return status as i32,
        };
        match sum_list_of_floats(seq) {
            Ok(sum) => {
                // SAFETY: out is non-null and writable per caller contract.
                unsafe { *out = sum };
                FfiStatus::Ok as i32
            }
            Err(e) => fail(&e) as i32,
        }
    })
}

/// Sum `len` doubles and report how long the summation took.
///
/// Writes the sum and the elapsed nanoseconds to `out` as one
/// [`FfiTimedSum`]. On failure `out` is left untouched: no partial
/// timing is ever reported.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffibench_sum_list_of_floats_with_timing(
    values: *const f64,
    len: usize,
    out: *mut FfiTimedSum,
) -> i32 {
    ffi_guard!({
        if out.is_null() {
            record_error("out is null");
            return FfiStatus::InvalidArgument as i32;
        }
        // SAFETY: values/len describe a caller-owned buffer.
        let seq = match unsafe { decode_values(values, len) } {
            Ok(seq) => seq,
            Err(status) => return status as i32,
        };
        match sum_list_of_floats_with_timing(seq) {
            Ok(outcome) => {
                // SAFETY: out is non-null and writable per caller contract.
                unsafe { *out = FfiTimedSum::from(outcome) };
                FfiStatus::Ok as i32
            }
            Err(e) => fail(&e) as i32,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn last_error() -> String {
        let mut buf = vec![0u8; 256];
        let len = crate::ffibench_last_error_message(
            buf.as_mut_ptr() as *mut std::ffi::c_char,
            buf.len(),
        );
        String::from_utf8(buf[..len.min(255)].to_vec()).unwrap()
    }

    #[test]
    fn adds_ten_and_twenty() {
        let mut out = 0i64;
        for _ in 0..1000 {
            out = 0;
            assert_eq!(ffibench_sum_as_i64(10, 20, &mut out), FfiStatus::Ok as i32);
        }
        assert_eq!(out, 30);
    }

    #[test]
    fn overflow_leaves_out_untouched() {
        let mut out = 999i64;
        assert_eq!(
            ffibench_sum_as_i64(i64::MAX, 1, &mut out),
            FfiStatus::IntegerOverflow as i32
        );
        assert_eq!(out, 999, "out must not be written on error");
        assert!(last_error().contains("overflow"));
    }

    #[test]
    fn null_out_is_invalid() {
        assert_eq!(
            ffibench_sum_as_i64(1, 2, std::ptr::null_mut()),
            FfiStatus::InvalidArgument as i32
        );
        let values = [1.0];
        assert_eq!(
            ffibench_sum_list_of_floats(values.as_ptr(), 1, std::ptr::null_mut()),
            FfiStatus::InvalidArgument as i32
        );
        assert_eq!(
            ffibench_sum_list_of_floats_with_timing(values.as_ptr(), 1, std::ptr::null_mut()),
            FfiStatus::InvalidArgument as i32
        );
    }

    #[test]
    fn empty_input_may_be_null() {
        let mut out = -1.0;
        assert_eq!(
            ffibench_sum_list_of_floats(std::ptr::null(), 0, &mut out),
            FfiStatus::Ok as i32
        );
        assert_eq!(out, 0.0);
    }

    #[test]
    fn null_values_with_len_is_invalid() {
        let mut out = -1.0;
        assert_eq!(
            ffibench_sum_list_of_floats(std::ptr::null(), 3, &mut out),
            FfiStatus::InvalidArgument as i32
        );
        assert_eq!(out, -1.0);
    }

    #[test]
    fn sums_arithmetic_series() {
        let values: Vec<f64> = (0..100_000).map(|i| i as f64).collect();
        let mut out = 0.0;
        assert_eq!(
            ffibench_sum_list_of_floats(values.as_ptr(), values.len(), &mut out),
            FfiStatus::Ok as i32
        );
        assert_eq!(out, 4_999_950_000.0);
    }

    #[test]
    fn timed_sum_matches_plain_sum() {
        let values = [1e16, 1.0, -1e16, 1.0, 0.5];
        let mut plain = 0.0;
        let mut timed = FfiTimedSum::default();
        assert_eq!(
            ffibench_sum_list_of_floats(values.as_ptr(), values.len(), &mut plain),
            FfiStatus::Ok as i32
        );
        assert_eq!(
            ffibench_sum_list_of_floats_with_timing(values.as_ptr(), values.len(), &mut timed),
            FfiStatus::Ok as i32
        );
        assert_eq!(timed.sum.to_bits(), plain.to_bits());
    }

    #[test]
    fn non_finite_input_is_rejected_without_timing() {
        let values = [1.0, f64::NAN];
        let sentinel = FfiTimedSum {
            sum: 7.0,
            elapsed_ns: 7,
        };
        let mut out = sentinel;
        assert_eq!(
            ffibench_sum_list_of_floats_with_timing(values.as_ptr(), values.len(), &mut out),
            FfiStatus::NonFiniteInput as i32
        );
        assert_eq!(out, sentinel);
        assert!(last_error().contains("index 1"));
    }

    #[test]
    fn overflowing_sum_is_reported() {
        let values = [f64::MAX, f64::MAX];
        let mut out = FfiTimedSum::default();
        assert_eq!(
            ffibench_sum_list_of_floats_with_timing(values.as_ptr(), values.len(), &mut out),
            FfiStatus::NonFiniteSum as i32
        );
        assert_eq!(out, FfiTimedSum::default());
    }

    proptest! {
        #[test]
        fn matches_core_add(a in any::<i64>(), b in any::<i64>()) {
            let mut out = 0i64;
            let status = ffibench_sum_as_i64(a, b, &mut out);
            match a.checked_add(b) {
                Some(expected) => {
                    prop_assert_eq!(status, FfiStatus::Ok as i32);
                    prop_assert_eq!(out, expected);
                }
                None => prop_assert_eq!(status, FfiStatus::IntegerOverflow as i32),
            }
        }
    }
}
