//! CLI argument parsing for the `ffibench` binary

use clap::{Parser, ValueEnum};

use crate::config::BenchConfig;
use crate::harness::Scenario;

/// Scenario selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    /// Scalar, bulk and decomposition in order (default)
    All,
    /// Scalar add only
    Scalar,
    /// Bulk sum only
    Bulk,
    /// Timed-call decomposition only
    Decomposition,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::All => Scenario::All,
            ScenarioArg::Scalar => Scenario::Scalar,
            ScenarioArg::Bulk => Scenario::Bulk,
            ScenarioArg::Decomposition => Scenario::Decomposition,
        }
    }
}

/// Native call path to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// Through the extern "C" entry points (default)
    CAbi,
    /// Straight into the computation, no boundary
    Direct,
    /// Through the Python module in an embedded interpreter
    #[cfg(feature = "python")]
    Python,
}

/// Command-line arguments of `ffibench`
#[derive(Parser, Debug)]
#[command(name = "ffibench")]
#[command(version)]
#[command(
    about = "Measure the cost of crossing a native call boundary",
    long_about = None
)]
pub struct Cli {
    /// Calls per path in the scalar scenario
    #[arg(long = "simple-iterations", value_name = "N", default_value = "1000000")]
    pub simple_iterations: u64,

    /// Calls per path in the bulk and decomposition scenarios
    #[arg(long = "bulk-iterations", value_name = "N", default_value = "1000")]
    pub bulk_iterations: u64,

    /// Length of the float input [0.0, 1.0, ..]
    #[arg(long = "list-size", value_name = "LEN", default_value = "100000")]
    pub list_size: usize,

    /// Left operand of the scalar add
    #[arg(
        short = 'a',
        long = "scalar-a",
        default_value = "10",
        allow_negative_numbers = true
    )]
    pub scalar_a: i64,

    /// Right operand of the scalar add
    #[arg(
        short = 'b',
        long = "scalar-b",
        default_value = "20",
        allow_negative_numbers = true
    )]
    pub scalar_b: i64,

    /// Scenarios to run
    #[arg(long = "scenario", value_enum, default_value = "all")]
    pub scenario: ScenarioArg,

    /// Call path to measure
    #[arg(long = "backend", value_enum, default_value = "c-abi")]
    pub backend: BackendArg,

    /// Coarsest clock tick accepted for the scalar scenario
    #[arg(long = "max-clock-resolution-ns", value_name = "NS", default_value = "1000")]
    pub max_clock_resolution_ns: u64,

    /// Allowed excess of internal over wall time in the decomposition
    #[arg(long = "skew-tolerance-ns", value_name = "NS", default_value = "1000")]
    pub skew_tolerance_ns: u64,

    /// Clock reads used to measure resolution
    #[arg(long = "resolution-reads", value_name = "N", default_value = "10000")]
    pub resolution_reads: usize,
}

impl Cli {
    /// The run configuration described by these arguments.
    pub fn config(&self) -> BenchConfig {
        BenchConfig {
            simple_iterations: self.simple_iterations,
            bulk_iterations: self.bulk_iterations,
            list_size: self.list_size,
            scalar_a: self.scalar_a,
            scalar_b: self.scalar_b,
            max_clock_resolution_ns: self.max_clock_resolution_ns,
            skew_tolerance_ns: self.skew_tolerance_ns,
            resolution_reads: self.resolution_reads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["ffibench"]);
        assert_eq!(cli.config(), BenchConfig::default());
        assert_eq!(cli.scenario, ScenarioArg::All);
        assert_eq!(cli.backend, BackendArg::CAbi);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "ffibench",
            "--simple-iterations",
            "500",
            "--bulk-iterations",
            "7",
            "--list-size",
            "0",
            "-a",
            "-5",
            "-b",
            "3",
        ]);
        let cfg = cli.config();
        assert_eq!(cfg.simple_iterations, 500);
        assert_eq!(cfg.bulk_iterations, 7);
        assert_eq!(cfg.list_size, 0);
        assert_eq!((cfg.scalar_a, cfg.scalar_b), (-5, 3));
    }

    #[test]
    fn test_cli_scenario_and_backend() {
        let cli = Cli::parse_from(["ffibench", "--scenario", "decomposition", "--backend", "direct"]);
        assert_eq!(Scenario::from(cli.scenario), Scenario::Decomposition);
        assert_eq!(cli.backend, BackendArg::Direct);
    }

    #[test]
    fn test_cli_rejects_unknown_scenario() {
        assert!(Cli::try_parse_from(["ffibench", "--scenario", "nope"]).is_err());
    }

    #[test]
    fn test_cli_rejects_negative_iterations() {
        assert!(Cli::try_parse_from(["ffibench", "--bulk-iterations", "-1"]).is_err());
    }

    #[cfg(feature = "python")]
    #[test]
    fn test_cli_python_backend() {
        let cli = Cli::parse_from(["ffibench", "--backend", "python"]);
        assert_eq!(cli.backend, BackendArg::Python);
    }
}
