//! Python bindings for the ffibench native layer.
//!
//! This crate provides PyO3 bindings wrapping the C FFI layer
//! (`ffibench-ffi`). The native extension is named `pyo3_ffi_benchmark`.
//! Loosely typed Python arguments are coerced here, outside the timed path;
//! the native functions underneath only ever see `i64` and `&[f64]`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(unsafe_code)]

use pyo3::prelude::*;

mod compute;
mod error;

/// Name the module is imported under.
pub const MODULE_NAME: &str = "pyo3_ffi_benchmark";

/// The native `pyo3_ffi_benchmark` extension module.
#[pymodule]
fn pyo3_ffi_benchmark(m: &Bound<'_, PyModule>) -> PyResult<()> {
    register(m)
}

/// Build the module inside an already running interpreter.
///
/// Used by embedders that link this crate directly instead of importing
/// the extension from disk. The module is also entered into `sys.modules`
/// so Python code in the same interpreter can `import` it.
pub fn new_module(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let m = PyModule::new(py, MODULE_NAME)?;
    register(&m)?;
    py.import("sys")?.getattr("modules")?.set_item(MODULE_NAME, &m)?;
    Ok(m)
}

fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Scalar
    m.add_function(wrap_pyfunction!(compute::sum_as_i64, m)?)?;

    // Sequences (list marshaling)
    m.add_function(wrap_pyfunction!(compute::sum_list_of_floats, m)?)?;
    m.add_function(wrap_pyfunction!(compute::sum_list_of_floats_with_timing, m)?)?;

    // Sequences (zero-copy NumPy buffers)
    m.add_function(wrap_pyfunction!(compute::sum_array_of_floats, m)?)?;
    m.add_function(wrap_pyfunction!(compute::sum_array_of_floats_with_timing, m)?)?;

    Ok(())
}
