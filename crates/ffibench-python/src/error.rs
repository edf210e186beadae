//! FfiStatus -> Python exception mapping with recovery hints.

use std::ffi::c_char;

use pyo3::exceptions::{PyOverflowError, PyRuntimeError, PyValueError};
use pyo3::PyResult;

use ffibench_ffi::{ffibench_last_error_message, ffibench_last_panic_message, FfiStatus};

/// Check an FFI status code. Returns `Ok(())` on success, raises a typed
/// Python exception carrying the native error detail and a hint otherwise.
pub(crate) fn check_status(code: i32) -> PyResult<()> {
    if code == FfiStatus::Ok as i32 {
        return Ok(());
    }
    let status = FfiStatus::from_code(code);
    let detail = match status {
        Some(FfiStatus::Panicked) => read_message(ffibench_last_panic_message),
        _ => read_message(ffibench_last_error_message),
    };
    let (msg, hint) = error_detail(status);
    let full = if detail.is_empty() {
        format!("ffibench error {code}: {msg}\n  Hint: {hint}")
    } else {
        format!("ffibench error {code}: {msg} ({detail})\n  Hint: {hint}")
    };
    match status {
        Some(FfiStatus::IntegerOverflow) => Err(PyOverflowError::new_err(full)),

        // Caller supplied unusable data → ValueError
        Some(FfiStatus::NonFiniteInput)
        | Some(FfiStatus::NonFiniteSum)
        | Some(FfiStatus::InvalidArgument) => Err(PyValueError::new_err(full)),

        _ => Err(PyRuntimeError::new_err(full)),
    }
}

/// Read a thread-local native message via a size-then-fill call pair.
fn read_message(read: extern "C" fn(*mut c_char, usize) -> usize) -> String {
    let len = read(std::ptr::null_mut(), 0);
    if len == 0 {
        return String::new();
    }
    let mut buf = vec![0u8; len + 1];
    let written = read(buf.as_mut_ptr() as *mut c_char, buf.len()).min(len);
    String::from_utf8_lossy(&buf[..written]).into_owned()
}

/// Returns `(message, recovery_hint)` for each status.
fn error_detail(status: Option<FfiStatus>) -> (&'static str, &'static str) {
    match status {
        Some(FfiStatus::Ok) => ("no error", "Nothing to recover from."),
        Some(FfiStatus::IntegerOverflow) => (
            "integer overflow in sum_as_i64",
            "Both operands and their sum must fit in a signed 64-bit integer \
             (-2**63 .. 2**63 - 1). Python ints are unbounded; the native \
             function is not.",
        ),
        Some(FfiStatus::NonFiniteInput) => (
            "non-finite value in input sequence",
            "NaN and +/-inf are rejected before summation. Filter them out \
             (e.g. with math.isfinite) or replace them before calling.",
        ),
        Some(FfiStatus::NonFiniteSum) => (
            "sum overflowed to infinity",
            "The inputs are finite but their running total exceeded the \
             float64 range. Scale the values down before summing.",
        ),
        Some(FfiStatus::InvalidArgument) => (
            "invalid argument",
            "A buffer pointer was null. This indicates a bug in the binding \
             layer rather than in the caller's data.",
        ),
        Some(FfiStatus::Panicked) => (
            "native code panicked",
            "A Rust panic was caught at the boundary. The message above is \
             the panic payload; please report it.",
        ),
        None => (
            "unknown ffibench error",
            "An unrecognized status code was returned from the FFI layer. \
             This may indicate a version mismatch between the Python \
             bindings and the native library.",
        ),
    }
}
