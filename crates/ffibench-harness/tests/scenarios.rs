//! Scenario runs against scripted and real backends.

use ffibench_core::{ComputeError, MonotonicClock};
use ffibench_harness::{BenchConfig, BenchError, CAbiBackend, DirectBackend, Harness, Scenario};
use ffibench_test_utils::{Behavior, ScriptedBackend, ScriptedClock, StepClock};

fn small() -> BenchConfig {
    BenchConfig {
        simple_iterations: 1_000,
        bulk_iterations: 3,
        list_size: 1_000,
        resolution_reads: 64,
        ..BenchConfig::default()
    }
}

#[test]
fn frozen_clock_refuses_scalar() {
    let h = Harness::new(small(), ScriptedBackend::new(0), StepClock::frozen(0)).unwrap();
    assert_eq!(h.clock_resolution_ns(), None);
    assert_eq!(
        h.run(Scenario::Scalar),
        Err(BenchError::CoarseClock {
            resolution_ns: None,
            limit_ns: 1_000,
        })
    );
}

#[test]
fn coarse_clock_skips_scalar_in_full_run() {
    let h = Harness::new(small(), ScriptedBackend::new(100), StepClock::new(0, 5_000)).unwrap();
    let report = h.run(Scenario::All).unwrap();
    assert!(report.scalar.is_none());
    assert_eq!(report.bulk.unwrap().result, 499_500.0);
    let d = report.decomposition.unwrap();
    assert_eq!(d.timing.wall_ns, 5_000);
    assert_eq!(d.timing.internal_ns, 300);

    assert_eq!(
        h.run(Scenario::Scalar),
        Err(BenchError::CoarseClock {
            resolution_ns: Some(5_000),
            limit_ns: 1_000,
        })
    );
}

#[test]
fn backwards_clock_clamps_to_zero() {
    let cfg = BenchConfig {
        resolution_reads: 1,
        ..small()
    };
    // Resolution: 0, 10. Baseline bracket: 500 -> 400. Native bracket: 600 -> 700.
    let clock = ScriptedClock::new(vec![0, 10, 500, 400, 600, 700]);
    let h = Harness::new(cfg, ScriptedBackend::new(0), &clock).unwrap();
    assert_eq!(h.clock_resolution_ns(), Some(10));
    let r = h.run_bulk().unwrap();
    assert_eq!(r.baseline.as_nanos(), 0);
    assert_eq!(r.native.as_nanos(), 100);
    assert_eq!(clock.remaining(), 0);
}

#[test]
fn scalar_result_is_thirty() {
    let backend = ScriptedBackend::new(0);
    let h = Harness::new(small(), backend, StepClock::new(0, 10)).unwrap();
    let r = h.run_scalar().unwrap();
    assert_eq!(r.result, 30);
    assert_eq!((r.a, r.b), (10, 20));
}

#[test]
fn scalar_overflow_aborts_run() {
    let cfg = BenchConfig {
        scalar_a: i64::MAX,
        scalar_b: 1,
        ..small()
    };
    let h = Harness::new(cfg, ScriptedBackend::new(0), StepClock::new(0, 10)).unwrap();
    assert_eq!(
        h.run(Scenario::All),
        Err(BenchError::Compute(ComputeError::IntegerOverflow {
            a: i64::MAX,
            b: 1
        }))
    );
}

#[test]
fn mismatching_backend_is_caught() {
    let backend = ScriptedBackend::with_behavior(0, Behavior::WrongResult);
    let h = Harness::new(small(), backend, StepClock::new(0, 10)).unwrap();
    assert!(matches!(
        h.run_scalar(),
        Err(BenchError::ResultMismatch { scenario: "scalar", .. })
    ));
    assert!(matches!(
        h.run_bulk(),
        Err(BenchError::ResultMismatch { scenario: "bulk", .. })
    ));
    assert!(matches!(
        h.run_decomposition(),
        Err(BenchError::ResultMismatch { scenario: "decomposition", .. })
    ));
}

#[test]
fn native_failure_stops_before_timing() {
    let backend = ScriptedBackend::with_behavior(0, Behavior::Fail { code: -128 });
    let h = Harness::new(small(), backend, StepClock::new(0, 10)).unwrap();
    assert!(matches!(
        h.run(Scenario::Bulk),
        Err(BenchError::Native { code: -128, .. })
    ));
}

#[test]
fn bulk_report_uses_shared_input() {
    let clock = StepClock::new(0, 10);
    let h = Harness::new(small(), ScriptedBackend::new(0), &clock).unwrap();
    let r = h.run_bulk().unwrap();
    assert_eq!(r.result, 499_500.0);
    assert_eq!(r.iterations, 3);
    assert_eq!(r.baseline.as_nanos(), 10);
    assert_eq!(r.native.as_nanos(), 10);
    assert_eq!(h.input().len(), 1_000);
}

#[test]
fn c_abi_full_run() {
    let cfg = BenchConfig {
        simple_iterations: 10_000,
        bulk_iterations: 3,
        resolution_reads: 10_000,
        ..BenchConfig::default()
    };
    let h = Harness::new(cfg, CAbiBackend::new(), MonotonicClock::shared()).unwrap();
    let report = h.run(Scenario::All).unwrap();
    assert_eq!(report.backend, "c-abi");
    assert_eq!(report.scalar.as_ref().unwrap().result, 30);
    assert_eq!(report.bulk.as_ref().unwrap().result, 4_999_950_000.0);

    let d = report.decomposition.as_ref().unwrap();
    assert_eq!(d.result, 4_999_950_000.0);
    assert!(d.timing.within_skew(1_000));

    let text = report.to_string();
    assert!(text.contains("Scenario A"));
    assert!(text.contains("Scenario C"));
}

#[test]
fn direct_backend_decomposes() {
    let cfg = BenchConfig {
        bulk_iterations: 5,
        list_size: 10_000,
        ..small()
    };
    let h = Harness::new(cfg, DirectBackend, MonotonicClock::shared()).unwrap();
    let r = h.run(Scenario::Decomposition).unwrap();
    let d = r.decomposition.unwrap();
    assert_eq!(d.timing.calls, 5);
    assert!(d.timing.internal_ns <= d.timing.wall_ns + 1_000);
}
