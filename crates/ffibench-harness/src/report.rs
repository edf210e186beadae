//! Scenario results and their text rendering.
//!
//! Reports hold raw nanosecond totals; every derived figure (averages,
//! ratios, shares) is computed on demand so the stored data stays exact.

use std::fmt;

use ffibench_core::{AggregateTiming, TimingSample};

const NS_PER_S: f64 = 1e9;
const NS_PER_MS: f64 = 1e6;
const NS_PER_US: f64 = 1e3;

fn per_call(total: TimingSample, calls: u64) -> f64 {
    if calls == 0 {
        0.0
    } else {
        total.as_nanos() as f64 / calls as f64
    }
}

fn secs(ns: f64) -> f64 {
    ns / NS_PER_S
}

/// Format an integer with `,` thousands separators.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ── Scenario A ─────────────────────────────────────────────────────

/// Scalar add: caller-side baseline against the native path.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarReport {
    /// Calls per path.
    pub iterations: u64,
    /// Left operand.
    pub a: i64,
    /// Right operand.
    pub b: i64,
    /// Result returned on every call.
    pub result: i64,
    /// Total time of the baseline loop.
    pub baseline: TimingSample,
    /// Total time of the native loop.
    pub native: TimingSample,
}

impl ScalarReport {
    /// Mean baseline call time.
    pub fn baseline_per_call_ns(&self) -> f64 {
        per_call(self.baseline, self.iterations)
    }

    /// Mean native call time.
    pub fn native_per_call_ns(&self) -> f64 {
        per_call(self.native, self.iterations)
    }

    /// Native time over baseline time; `None` if the baseline took no
    /// measurable time.
    pub fn ratio(&self) -> Option<f64> {
        if self.baseline.as_nanos() == 0 {
            None
        } else {
            Some(self.native.as_nanos() as f64 / self.baseline.as_nanos() as f64)
        }
    }

    /// Approximate boundary cost per call: native mean minus baseline mean.
    pub fn overhead_per_call_ns(&self) -> f64 {
        self.native_per_call_ns() - self.baseline_per_call_ns()
    }
}

impl fmt::Display for ScalarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Scenario A: scalar add ({} + {}) ---", self.a, self.b)?;
        writeln!(f, "Baseline:      {:.6} s", secs(self.baseline.as_nanos() as f64))?;
        writeln!(f, "Native path:   {:.6} s", secs(self.native.as_nanos() as f64))?;
        match self.ratio() {
            Some(r) => writeln!(f, "Native path takes {r:.2}x the baseline time")?,
            None => writeln!(f, "Native path ratio: n/a (baseline below clock resolution)")?,
        }
        writeln!(
            f,
            "Baseline per call (approx):          {:.2} ns",
            self.baseline_per_call_ns()
        )?;
        writeln!(
            f,
            "Native per call (approx):            {:.2} ns",
            self.native_per_call_ns()
        )?;
        writeln!(
            f,
            "Boundary overhead per call (approx): {:.2} ns",
            self.overhead_per_call_ns()
        )
    }
}

// ── Scenario B ─────────────────────────────────────────────────────

/// Direction and size of a speed difference. Ratios are always `>= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Comparison {
    /// Native path is faster by this factor.
    Faster(f64),
    /// Native path is slower (or equal) by this factor.
    Slower(f64),
    /// One side took no measurable time.
    Indeterminate,
}

/// Bulk sum: caller-side baseline against the native path.
#[derive(Clone, Debug, PartialEq)]
pub struct BulkReport {
    /// Calls per path.
    pub iterations: u64,
    /// Input length.
    pub list_size: usize,
    /// Sum returned by every call.
    pub result: f64,
    /// Total time of the baseline loop.
    pub baseline: TimingSample,
    /// Total time of the native loop.
    pub native: TimingSample,
}

impl BulkReport {
    /// Faster/slower verdict for the native path.
    pub fn comparison(&self) -> Comparison {
        let base = self.baseline.as_nanos();
        let native = self.native.as_nanos();
        if base == 0 || native == 0 {
            return Comparison::Indeterminate;
        }
        if native < base {
            Comparison::Faster(base as f64 / native as f64)
        } else {
            Comparison::Slower(native as f64 / base as f64)
        }
    }

    /// Native mean minus baseline mean, computation included.
    pub fn per_call_difference_ns(&self) -> f64 {
        per_call(self.native, self.iterations) - per_call(self.baseline, self.iterations)
    }
}

impl fmt::Display for BulkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = group_thousands(self.list_size as u64);
        writeln!(f, "--- Scenario B: sum of {len} floats ---")?;
        writeln!(f, "Baseline:      {:.6} s", secs(self.baseline.as_nanos() as f64))?;
        writeln!(f, "Native path:   {:.6} s", secs(self.native.as_nanos() as f64))?;
        match self.comparison() {
            Comparison::Faster(r) => writeln!(f, "Native path is {r:.2}x faster than the baseline")?,
            Comparison::Slower(r) => writeln!(f, "Native path is {r:.2}x slower than the baseline")?,
            Comparison::Indeterminate => {
                writeln!(f, "Native path comparison: n/a (below clock resolution)")?
            }
        }
        writeln!(
            f,
            "Per-call total difference (incl. computation): {:.2} µs",
            self.per_call_difference_ns() / NS_PER_US
        )
    }
}

// ── Scenario C ─────────────────────────────────────────────────────

/// Timed calls: wall time split into native work and boundary overhead.
#[derive(Clone, Debug, PartialEq)]
pub struct DecompositionReport {
    /// Input length.
    pub list_size: usize,
    /// Sum returned by the last call.
    pub result: f64,
    /// Accumulated totals.
    pub timing: AggregateTiming,
}

impl fmt::Display for DecompositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.timing;
        writeln!(
            f,
            "--- Scenario C: time decomposition over {} timed calls ---",
            group_thousands(t.calls)
        )?;
        writeln!(f, "Totals")?;
        writeln!(f, "  Wall time     (T_total):    {:.6} s", secs(t.wall_ns as f64))?;
        writeln!(f, "  Native time   (T_native):   {:.6} s", secs(t.internal_ns as f64))?;
        writeln!(f, "  Boundary time (T_boundary): {:.6} s", secs(t.overhead_ns() as f64))?;
        writeln!(f, "Per call")?;
        writeln!(f, "  Avg wall:     {:.6} ms", t.avg_wall_ns() / NS_PER_MS)?;
        writeln!(f, "  Avg native:   {:.6} ms", t.avg_internal_ns() / NS_PER_MS)?;
        writeln!(f, "  Avg boundary: {:.6} ms", t.avg_overhead_ns() / NS_PER_MS)?;
        let shares = t.shares();
        write!(
            f,
            "Native computation: {:.2}% of wall time, boundary overhead: {:.2}%",
            shares.internal_pct, shares.overhead_pct
        )?;
        if t.is_noise_dominated() {
            write!(f, " (overhead below clock noise)")?;
        }
        writeln!(f)
    }
}

// ── Full run ───────────────────────────────────────────────────────

/// Everything one harness run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchReport {
    /// Backend that was measured.
    pub backend: &'static str,
    /// Scalar-scenario calls per path.
    pub simple_iterations: u64,
    /// Bulk/decomposition calls per path.
    pub bulk_iterations: u64,
    /// Shared input length.
    pub list_size: usize,
    /// Measured clock resolution.
    pub clock_resolution_ns: Option<u64>,
    /// Scenario A, if run.
    pub scalar: Option<ScalarReport>,
    /// Scenario B, if run.
    pub bulk: Option<BulkReport>,
    /// Scenario C, if run.
    pub decomposition: Option<DecompositionReport>,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- FFI overhead measurement (backend: {}) ---", self.backend)?;
        writeln!(f, "Scalar calls:     {}", group_thousands(self.simple_iterations))?;
        writeln!(f, "Bulk calls:       {}", group_thousands(self.bulk_iterations))?;
        writeln!(f, "Input length:     {}", group_thousands(self.list_size as u64))?;
        match self.clock_resolution_ns {
            Some(ns) => writeln!(f, "Clock resolution: {ns} ns")?,
            None => writeln!(f, "Clock resolution: unknown")?,
        }
        for section in [
            self.scalar.as_ref().map(|r| r as &dyn fmt::Display),
            self.bulk.as_ref().map(|r| r as &dyn fmt::Display),
            self.decomposition.as_ref().map(|r| r as &dyn fmt::Display),
        ]
        .into_iter()
        .flatten()
        {
            writeln!(f)?;
            write!(f, "{section}")?;
        }
        Ok(())
    }
}
