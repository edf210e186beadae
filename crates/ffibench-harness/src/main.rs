//! `ffibench`: measure native call boundary overhead.

use std::process::ExitCode;

use clap::Parser;
use ffibench_core::MonotonicClock;
use ffibench_harness::cli::{BackendArg, Cli};
use ffibench_harness::{
    BenchError, BenchReport, CAbiBackend, DirectBackend, Harness, NativeBackend, Scenario,
};

fn run_with<B: NativeBackend>(cli: &Cli, backend: B) -> Result<BenchReport, BenchError> {
    // Same clock domain as the native side's internal samples.
    let harness = Harness::new(cli.config(), backend, MonotonicClock::shared())?;
    harness.run(Scenario::from(cli.scenario))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = match cli.backend {
        BackendArg::CAbi => run_with(&cli, CAbiBackend::new()),
        BackendArg::Direct => run_with(&cli, DirectBackend),
        #[cfg(feature = "python")]
        BackendArg::Python => ffibench_harness::PythonBackend::new()
            .and_then(|backend| run_with(&cli, backend)),
    };
    match result {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ffibench: error: {e}");
            ExitCode::FAILURE
        }
    }
}
