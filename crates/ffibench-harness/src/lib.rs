//! Caller-side harness that decomposes native call time.
//!
//! The harness times a caller-side baseline against a [`NativeBackend`]
//! for a scalar add and a bulk float sum, then calls the timed variant of
//! the sum repeatedly to split caller-measured wall time into native work
//! and boundary overhead. Everything it needs is fixed up front in a
//! [`BenchConfig`]; results come back as a [`BenchReport`] whose `Display`
//! impl is the binary's output.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod backend;
pub mod baseline;
pub mod cli;
pub mod config;
pub mod error;
pub mod harness;
#[cfg(feature = "python")]
pub mod python;
pub mod report;

pub use backend::{CAbiBackend, DirectBackend, NativeBackend};
pub use config::{BenchConfig, ConfigError};
pub use error::BenchError;
pub use harness::{build_input, Harness, Scenario};
#[cfg(feature = "python")]
pub use python::PythonBackend;
pub use report::{BenchReport, BulkReport, Comparison, DecompositionReport, ScalarReport};
