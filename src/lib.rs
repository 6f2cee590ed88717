// Export modules for library usage
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod input;
pub mod io;
pub mod observability;

// Re-export commonly used types
pub use crate::core::{
    evaluate, evaluate_default, AuditInput, AuditOutcome, AuditTier, BurnoutCurve, DropGuard,
    FinancialInputs, GapBand, MarketInputs, MarketPhase, ReportSettings, TierReport,
    TierThresholds,
};

pub use crate::batch::{evaluate_batch, BatchReport, BatchSummary, ScenarioOutcome};

pub use crate::config::{load_config, AuditConfig};

pub use crate::errors::{Error, Result};

pub use crate::input::{
    input_from_percentages, load_scenarios, CompetitionLevel, InputGuard, NamedScenario,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
