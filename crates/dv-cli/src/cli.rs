//! CLI argument definitions for the dataset validator.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use dv_ingest::{DEFAULT_SPLIT_SEED, DEFAULT_TEST_RATIO};
use dv_validate::DEFAULT_DRIFT_THRESHOLD;

use dv_cli::config::{ARTIFACT_DIR, SCHEMA_FILE_PATH, StructuralPolicy};

#[derive(Parser)]
#[command(
    name = "dv",
    version,
    about = "Dataset validator - schema checks and drift detection for train/test splits",
    long_about = "Validate train/test CSV datasets against a YAML schema.\n\n\
                  Checks column counts and numeric column types, then runs a\n\
                  two-sample Kolmogorov-Smirnov test per column to detect drift."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Split a source CSV into train/test, then validate the split.
    Run(RunArgs),

    /// Validate an existing train/test pair.
    Validate(ValidateArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Source CSV holding the full dataset.
    #[arg(long = "source", value_name = "CSV")]
    pub source: PathBuf,

    /// Fraction of rows placed in the test split.
    #[arg(long = "test-ratio", value_name = "F", default_value_t = DEFAULT_TEST_RATIO)]
    pub test_ratio: f64,

    /// Seed for the row shuffle.
    #[arg(long = "seed", value_name = "N", default_value_t = DEFAULT_SPLIT_SEED)]
    pub seed: u64,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Training (baseline) CSV.
    #[arg(long = "train", value_name = "CSV")]
    pub train: PathBuf,

    /// Test (current) CSV.
    #[arg(long = "test", value_name = "CSV")]
    pub test: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options shared by `run` and `validate`.
#[derive(Args)]
pub struct CommonArgs {
    /// Schema YAML describing the expected columns.
    #[arg(long = "schema", value_name = "YAML", default_value = SCHEMA_FILE_PATH)]
    pub schema: PathBuf,

    /// Root directory for timestamped run artifacts.
    #[arg(long = "artifact-dir", value_name = "DIR", default_value = ARTIFACT_DIR)]
    pub artifact_dir: PathBuf,

    /// KS p-value below which a column counts as drifted.
    #[arg(long = "threshold", value_name = "P", default_value_t = DEFAULT_DRIFT_THRESHOLD)]
    pub threshold: f64,

    /// What to do when a dataset fails the structural checks.
    ///
    /// `halt` fails validation, skips drift detection, and writes failing
    /// datasets to the invalid directory. `continue` logs the findings and
    /// still runs drift detection.
    #[arg(
        long = "on-structural-failure",
        value_enum,
        default_value = "halt"
    )]
    pub on_structural_failure: StructuralPolicyArg,

    /// Summary format printed to stdout.
    #[arg(long = "output", value_enum, default_value = "text")]
    pub output: OutputArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StructuralPolicyArg {
    Halt,
    Continue,
}

impl From<StructuralPolicyArg> for StructuralPolicy {
    fn from(arg: StructuralPolicyArg) -> Self {
        match arg {
            StructuralPolicyArg::Halt => StructuralPolicy::Halt,
            StructuralPolicyArg::Continue => StructuralPolicy::Continue,
        }
    }
}

/// Summary output choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn validate_defaults() {
        let cli = Cli::parse_from(["dv", "validate", "--train", "a.csv", "--test", "b.csv"]);
        let Command::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.train, PathBuf::from("a.csv"));
        assert_eq!(args.common.schema, PathBuf::from(SCHEMA_FILE_PATH));
        assert_eq!(args.common.threshold, DEFAULT_DRIFT_THRESHOLD);
        assert_eq!(
            StructuralPolicy::from(args.common.on_structural_failure),
            StructuralPolicy::Halt
        );
        assert!(args.common.output == OutputArg::Text);
    }

    #[test]
    fn run_options() {
        let cli = Cli::parse_from([
            "dv",
            "run",
            "--source",
            "data.csv",
            "--test-ratio",
            "0.3",
            "--seed",
            "7",
            "--on-structural-failure",
            "continue",
            "--output",
            "json",
        ]);
        let Command::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.test_ratio, 0.3);
        assert_eq!(args.seed, 7);
        assert_eq!(
            StructuralPolicy::from(args.common.on_structural_failure),
            StructuralPolicy::Continue
        );
        assert!(args.common.output == OutputArg::Json);
    }
}
