//! Native call paths the harness can measure.
//!
//! [`NativeBackend`] is the seam between the harness and whatever sits on
//! the far side of the boundary. [`CAbiBackend`] crosses the `extern "C"`
//! entry points of `ffibench-ffi`; [`DirectBackend`] calls `ffibench-core`
//! with no boundary at all and serves as a zero-overhead reference.

use std::ffi::c_char;
use std::hint::black_box;

use ffibench_core::{
    sum_as_i64, sum_list_of_floats, sum_list_of_floats_with_timing, FloatSeq, TimedOutcome,
    TimingSample,
};
use ffibench_ffi::{
    ffibench_last_error_message, ffibench_last_panic_message, ffibench_sum_as_i64,
    ffibench_sum_list_of_floats, ffibench_sum_list_of_floats_with_timing, FfiStatus, FfiTimedSum,
};

use crate::error::BenchError;

/// The three native entry points, as seen from the caller.
pub trait NativeBackend {
    /// Short name used in reports.
    fn name(&self) -> &'static str;

    /// Integer addition across the boundary.
    fn sum_as_i64(&self, a: i64, b: i64) -> Result<i64, BenchError>;

    /// Sequential float summation across the boundary.
    fn sum_list_of_floats(&self, values: &[f64]) -> Result<f64, BenchError>;

    /// Float summation returning the native-side duration as well.
    fn sum_list_of_floats_with_timing(
        &self,
        values: &[f64],
    ) -> Result<TimedOutcome<f64>, BenchError>;
}

type SumI64Fn = extern "C" fn(i64, i64, *mut i64) -> i32;
type SumF64Fn = extern "C" fn(*const f64, usize, *mut f64) -> i32;
type SumF64TimedFn = extern "C" fn(*const f64, usize, *mut FfiTimedSum) -> i32;

/// Calls through the C ABI of `ffibench-ffi`.
///
/// Entry points are held as function pointers and laundered through
/// [`black_box`] on every call so the optimizer cannot inline the callee
/// and erase the boundary being measured.
#[derive(Clone, Copy, Debug)]
pub struct CAbiBackend {
    sum_i64: SumI64Fn,
    sum_f64: SumF64Fn,
    sum_f64_timed: SumF64TimedFn,
}

impl CAbiBackend {
    /// Bind to the entry points linked into this binary.
    pub fn new() -> Self {
        Self {
            sum_i64: ffibench_sum_as_i64,
            sum_f64: ffibench_sum_list_of_floats,
            sum_f64_timed: ffibench_sum_list_of_floats_with_timing,
        }
    }
}

impl Default for CAbiBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a status code into `Ok(())` or a [`BenchError::Native`]
/// carrying the thread-local native message.
fn check(code: i32) -> Result<(), BenchError> {
    if code == FfiStatus::Ok as i32 {
        return Ok(());
    }
    let read: extern "C" fn(*mut c_char, usize) -> usize = if code == FfiStatus::Panicked as i32 {
        ffibench_last_panic_message
    } else {
        ffibench_last_error_message
    };
    let len = read(std::ptr::null_mut(), 0);
    let mut buf = vec![0u8; len + 1];
    let written = read(buf.as_mut_ptr() as *mut c_char, buf.len()).min(len);
    Err(BenchError::Native {
        code,
        detail: String::from_utf8_lossy(&buf[..written]).into_owned(),
    })
}

impl NativeBackend for CAbiBackend {
    fn name(&self) -> &'static str {
        "c-abi"
    }

    #[inline(never)]
    fn sum_as_i64(&self, a: i64, b: i64) -> Result<i64, BenchError> {
        let f = black_box(self.sum_i64);
        let mut out = 0i64;
        check(f(a, b, &mut out))?;
        Ok(out)
    }

    #[inline(never)]
    fn sum_list_of_floats(&self, values: &[f64]) -> Result<f64, BenchError> {
        let f = black_box(self.sum_f64);
        let mut out = 0.0;
        check(f(values.as_ptr(), values.len(), &mut out))?;
        Ok(out)
    }

    #[inline(never)]
    fn sum_list_of_floats_with_timing(
        &self,
        values: &[f64],
    ) -> Result<TimedOutcome<f64>, BenchError> {
        let f = black_box(self.sum_f64_timed);
        let mut out = FfiTimedSum::default();
        check(f(values.as_ptr(), values.len(), &mut out))?;
        Ok(TimedOutcome {
            value: out.sum,
            elapsed: TimingSample::from_nanos(out.elapsed_ns),
        })
    }
}

/// Calls `ffibench-core` directly, without any boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectBackend;

impl NativeBackend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn sum_as_i64(&self, a: i64, b: i64) -> Result<i64, BenchError> {
        Ok(sum_as_i64(a, b)?)
    }

    fn sum_list_of_floats(&self, values: &[f64]) -> Result<f64, BenchError> {
        Ok(sum_list_of_floats(FloatSeq::new(values)?)?)
    }

    fn sum_list_of_floats_with_timing(
        &self,
        values: &[f64],
    ) -> Result<TimedOutcome<f64>, BenchError> {
        Ok(sum_list_of_floats_with_timing(FloatSeq::new(values)?)?)
    }
}
