//! C ABI entry points for the ffibench native computation layer.
//!
//! Every exported function returns an [`FfiStatus`] code (`0` on success)
//! and writes its result through an out-pointer only when it succeeds.
//! Panics never unwind across the boundary: `ffi_guard!` catches them and
//! reports [`FfiStatus::Panicked`], keeping the message for
//! [`ffibench_last_panic_message`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

use std::cell::RefCell;
use std::ffi::c_char;

/// Run an entry-point body, converting a panic into `FfiStatus::Panicked`.
///
/// The body evaluates to an `i32` status; `return` inside it returns from
/// the guarded closure, not the enclosing function.
macro_rules! ffi_guard {
    ($body:block) => {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(status) => status,
            Err(payload) => {
                $crate::record_panic(&*payload);
                $crate::status::FfiStatus::Panicked as i32
            }
        }
    };
}

pub mod compute;
pub mod status;
pub mod types;

pub use compute::{
    ffibench_sum_as_i64, ffibench_sum_list_of_floats, ffibench_sum_list_of_floats_with_timing,
};
pub use status::FfiStatus;
pub use types::FfiTimedSum;

thread_local! {
    /// Message of the most recent panic caught on this thread.
    pub(crate) static LAST_PANIC: RefCell<String> = const { RefCell::new(String::new()) };
    /// Description of the most recent failed call on this thread.
    pub(crate) static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

pub(crate) fn record_panic(payload: &(dyn std::any::Any + Send)) {
    let msg = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    };
    LAST_PANIC.with(|cell| *cell.borrow_mut() = msg);
}

pub(crate) fn record_error(msg: impl std::fmt::Display) {
    LAST_ERROR.with(|cell| {
        let mut buf = cell.borrow_mut();
        buf.clear();
        use std::fmt::Write;
        let _ = write!(buf, "{msg}");
    });
}

/// Copy `msg` into `buf` as a NUL-terminated string, truncating to fit.
///
/// Returns the full length of `msg` in bytes (excluding the terminator),
/// so callers can size a buffer with a first call that passes null.
#[allow(unsafe_code)]
fn copy_message(msg: &str, buf: *mut c_char, cap: usize) -> usize {
    let bytes = msg.as_bytes();
    if !buf.is_null() && cap > 0 {
        let copy_len = bytes.len().min(cap - 1);
        // SAFETY: buf points to at least cap writable bytes per caller contract.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, copy_len);
            *buf.add(copy_len) = 0;
        }
    }
    bytes.len()
}

/// Message of the most recent panic caught on the calling thread.
///
/// Writes up to `cap - 1` bytes plus a NUL terminator into `buf` (skipped
/// when `buf` is null) and returns the untruncated length. Returns `0` if
/// no panic has been caught on this thread.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffibench_last_panic_message(buf: *mut c_char, cap: usize) -> usize {
    LAST_PANIC.with(|cell| copy_message(&cell.borrow(), buf, cap))
}

/// Description of the most recent failed call on the calling thread.
///
/// Same buffer contract as [`ffibench_last_panic_message`]. The message
/// is only meaningful right after a call returned a non-zero status.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn ffibench_last_error_message(buf: *mut c_char, cap: usize) -> usize {
    LAST_ERROR.with(|cell| copy_message(&cell.borrow(), buf, cap))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_panic() -> String {
        let len = ffibench_last_panic_message(std::ptr::null_mut(), 0);
        let mut buf = vec![0u8; len + 1];
        let len2 = ffibench_last_panic_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, len2);
        String::from_utf8(buf[..len].to_vec()).unwrap()
    }

    #[test]
    fn guard_passes_status_through() {
        let status = ffi_guard!({ FfiStatus::InvalidArgument as i32 });
        assert_eq!(status, FfiStatus::InvalidArgument as i32);
    }

    #[test]
    fn guard_catches_panic_and_stores_message() {
        LAST_PANIC.with(|cell| cell.borrow_mut().clear());
        let status = ffi_guard!({
            panic!("deliberate panic inside guarded body");
        });
        assert_eq!(status, FfiStatus::Panicked as i32);
        assert!(read_panic().contains("deliberate panic inside guarded body"));
    }

    #[test]
    fn formatted_panic_payload_is_kept() {
        let n = 7;
        let status = ffi_guard!({
            panic!("formatted {n}");
        });
        assert_eq!(status, FfiStatus::Panicked as i32);
        assert_eq!(read_panic(), "formatted 7");
    }

    #[test]
    fn message_is_truncated_to_capacity() {
        record_error("abcdefgh");
        let mut buf = [0xffu8; 4];
        let len = ffibench_last_error_message(buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(len, 8);
        assert_eq!(&buf, b"abc\0");
    }

    #[test]
    fn zero_capacity_writes_nothing() {
        record_error("xyz");
        let mut buf = [0xffu8; 2];
        let len = ffibench_last_error_message(buf.as_mut_ptr() as *mut c_char, 0);
        assert_eq!(len, 3);
        assert_eq!(buf, [0xff, 0xff]);
    }

    #[test]
    fn message_exports_are_c_callable() {
        let exports: [extern "C" fn(*mut c_char, usize) -> usize; 2] =
            [ffibench_last_panic_message, ffibench_last_error_message];
        record_error("status detail");
        assert_eq!(exports[1](std::ptr::null_mut(), 0), "status detail".len());
        let mut buf = [0u8; 1];
        exports[0](buf.as_mut_ptr() as *mut c_char, buf.len());
        assert_eq!(buf, [0]);
    }
}
