//! C-compatible composite return values.

use ffibench_core::TimedOutcome;

/// Result and internal duration of one timed float summation.
///
/// Both fields are written together by
/// [`ffibench_sum_list_of_floats_with_timing`](crate::ffibench_sum_list_of_floats_with_timing)
/// and always describe the same invocation.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FfiTimedSum {
    /// The computed sum.
    pub sum: f64,
    /// Nanoseconds spent inside the summation.
    pub elapsed_ns: u64,
}

// 2×8 bytes, align 8.
const _: () = assert!(std::mem::size_of::<FfiTimedSum>() == 16);
const _: () = assert!(std::mem::align_of::<FfiTimedSum>() == 8);

impl From<TimedOutcome<f64>> for FfiTimedSum {
    fn from(o: TimedOutcome<f64>) -> Self {
        Self {
            sum: o.value,
            elapsed_ns: o.elapsed.as_nanos(),
        }
    }
}
