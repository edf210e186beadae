//! Backend that calls the `pyo3_ffi_benchmark` module through an embedded
//! interpreter.
//!
//! Every call goes through Python's own call machinery: argument tuple,
//! PyO3 dispatch, list-to-`Vec<f64>` extraction, status check and result
//! boxing. That is the marshaling and dispatch cost an interpreted caller
//! pays, so the decomposition scenario splits it out from the native sum.
//!
//! The module is built in-process from the linked `ffibench-python` crate,
//! so its timed variant reads the same process clock as the harness.

use std::cell::RefCell;

use ffibench_core::{TimedOutcome, TimingSample};
use pyo3::prelude::*;
use pyo3::types::PyList;

use crate::backend::NativeBackend;
use crate::error::BenchError;

/// A Python list mirroring one caller slice.
struct CachedList {
    ptr: *const f64,
    len: usize,
    list: Py<PyList>,
}

/// Calls through the Python-facing functions of `pyo3_ffi_benchmark`.
pub struct PythonBackend {
    sum_i64: Py<PyAny>,
    sum_f64: Py<PyAny>,
    sum_f64_timed: Py<PyAny>,
    list: RefCell<Option<CachedList>>,
}

impl PythonBackend {
    /// Start (or join) the embedded interpreter and build the module.
    pub fn new() -> Result<Self, BenchError> {
        Python::attach(|py| {
            let m = pyo3_ffi_benchmark::new_module(py).map_err(|e| interpreter_error(py, e))?;
            let get = |name: &str| {
                m.getattr(name).map(Bound::unbind).map_err(|e| interpreter_error(py, e))
            };
            Ok(Self {
                sum_i64: get("sum_as_i64")?,
                sum_f64: get("sum_list_of_floats")?,
                sum_f64_timed: get("sum_list_of_floats_with_timing")?,
                list: RefCell::new(None),
            })
        })
    }

    /// The Python list for `values`, built on first use.
    ///
    /// Keyed on the slice's address and length: a caller that hands in
    /// the same immutable input every time pays for the conversion once,
    /// as a Python caller holding its list would.
    fn list_for<'py>(
        &self,
        py: Python<'py>,
        values: &[f64],
    ) -> Result<Bound<'py, PyList>, BenchError> {
        let mut cache = self.list.borrow_mut();
        if let Some(c) = cache.as_ref() {
            if c.ptr == values.as_ptr() && c.len == values.len() {
                return Ok(c.list.bind(py).clone());
            }
        }
        let list = PyList::new(py, values).map_err(|e| interpreter_error(py, e))?;
        *cache = Some(CachedList {
            ptr: values.as_ptr(),
            len: values.len(),
            list: list.clone().unbind(),
        });
        Ok(list)
    }
}

fn interpreter_error(py: Python<'_>, e: PyErr) -> BenchError {
    let exception = e
        .get_type(py)
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "Exception".to_string());
    BenchError::Interpreter {
        exception,
        detail: e.value(py).to_string(),
    }
}

impl NativeBackend for PythonBackend {
    fn name(&self) -> &'static str {
        "python"
    }

    fn sum_as_i64(&self, a: i64, b: i64) -> Result<i64, BenchError> {
        Python::attach(|py| {
            self.sum_i64
                .bind(py)
                .call1((a, b))
                .and_then(|r| r.extract::<i64>().map_err(Into::into))
                .map_err(|e| interpreter_error(py, e))
        })
    }

    fn sum_list_of_floats(&self, values: &[f64]) -> Result<f64, BenchError> {
        Python::attach(|py| {
            let list = self.list_for(py, values)?;
            self.sum_f64
                .bind(py)
                .call1((list,))
                .and_then(|r| r.extract::<f64>().map_err(Into::into))
                .map_err(|e| interpreter_error(py, e))
        })
    }

    fn sum_list_of_floats_with_timing(
        &self,
        values: &[f64],
    ) -> Result<TimedOutcome<f64>, BenchError> {
        Python::attach(|py| {
            let list = self.list_for(py, values)?;
            let (value, elapsed_ns) = self
                .sum_f64_timed
                .bind(py)
                .call1((list,))
                .and_then(|r| r.extract::<(f64, u64)>().map_err(Into::into))
                .map_err(|e| interpreter_error(py, e))?;
            Ok(TimedOutcome {
                value,
                elapsed: TimingSample::from_nanos(elapsed_ns),
            })
        })
    }
}
