use crate::cli::ReportArgs;
use crate::config::{load_config, AuditConfig};
use crate::core::{evaluate, AuditInput, AuditOutcome};
use crate::formatting::FormattingConfig;
use crate::input::{input_from_percentages, load_input, CompetitionLevel, InputGuard};
use crate::io::{create_writer, open_destination, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Where the six audit inputs come from.
#[derive(Debug, Clone)]
pub enum InputSource {
    Flags {
        population_pct: f64,
        income_pct: f64,
        competition: CompetitionLevel,
        prior_actual: f64,
        target: f64,
        team_cost: f64,
    },
    File(PathBuf),
}

impl InputSource {
    pub fn resolve(&self) -> Result<AuditInput> {
        match self {
            InputSource::Flags {
                population_pct,
                income_pct,
                competition,
                prior_actual,
                target,
                team_cost,
            } => Ok(input_from_percentages(
                *population_pct,
                *income_pct,
                *competition,
                *prior_actual,
                *target,
                *team_cost,
            )),
            InputSource::File(path) => Ok(load_input(path)?),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuditCommandConfig {
    pub source: InputSource,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub formatting: FormattingConfig,
}

impl AuditCommandConfig {
    pub fn new(source: InputSource, report: &ReportArgs) -> Self {
        Self {
            source,
            format: report.format,
            output: report.output.clone(),
            config: report.config.clone(),
            strict: report.strict,
            formatting: super::formatting_for(report),
        }
    }
}

/// Resolve inputs, validate them in strict mode and evaluate. No output.
pub fn run_audit(command: &AuditCommandConfig, audit_config: &AuditConfig) -> Result<AuditOutcome> {
    let input = command.source.resolve()?;

    if command.strict {
        InputGuard::strict().check(&input)?;
    }

    let outcome = evaluate(&input, audit_config);
    tracing::info!(
        tier = %outcome.tier,
        relative_gap = outcome.relative_gap,
        burnout_ratio = outcome.burnout_ratio,
        "audit complete"
    );
    Ok(outcome)
}

pub fn handle_audit(command: AuditCommandConfig) -> Result<()> {
    let audit_config = load_config(command.config.as_deref()).context("Failed to load configuration")?;
    let outcome = run_audit(&command, &audit_config)?;

    let destination = open_destination(command.output.as_deref())?;
    let mut writer = create_writer(command.format, destination, command.formatting, audit_config.report);
    writer.write_outcome(&outcome)?;

    if let Some(path) = &command.output {
        eprintln!("Report written to {}", path.display());
    }
    Ok(())
}
