use crate::input::CompetitionLevel;
use crate::io::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "target-audit")]
#[command(about = "Audit sales targets against market capacity and estimate burnout cost", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every command that produces a report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (defaults to the nearest .target-audit.toml)
    #[arg(short, long, env = "TARGET_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Reject inputs outside the expected ranges instead of auditing them
    #[arg(long)]
    pub strict: bool,

    /// Plain output: no colors, no emoji, ASCII only
    #[arg(long)]
    pub plain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit one sales target
    Audit {
        /// Population change rate in percent (e.g. -1.0)
        #[arg(long = "population", default_value = "-1.0", allow_negative_numbers = true)]
        population_pct: f64,

        /// Income / unit price change rate in percent
        #[arg(long = "income", default_value = "0.0", allow_negative_numbers = true)]
        income_pct: f64,

        /// Change in competitive position
        #[arg(long, value_enum, default_value = "stable")]
        competition: CompetitionLevel,

        /// Prior period actual sales
        #[arg(long = "prior-actual", default_value = "100.0", allow_negative_numbers = true)]
        prior_actual: f64,

        /// Company target for this period
        #[arg(long, default_value = "105.0", allow_negative_numbers = true)]
        target: f64,

        /// Total sales team cost
        #[arg(long = "team-cost", default_value = "50.0", allow_negative_numbers = true)]
        team_cost: f64,

        /// Read the six inputs from a JSON or TOML file instead of flags
        #[arg(long, conflicts_with_all = ["population_pct", "income_pct", "competition", "prior_actual", "target", "team_cost"])]
        scenario: Option<PathBuf>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Audit every scenario in a JSON or TOML file in parallel
    Batch {
        /// Scenario file (`[[scenario]]` tables or a JSON array)
        file: PathBuf,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long, default_value = "0")]
        jobs: usize,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Write a default .target-audit.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List the competitive levels and their coefficients
    Levels,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
