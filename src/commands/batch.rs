use crate::batch::{evaluate_batch, BatchReport};
use crate::cli::ReportArgs;
use crate::config::{load_config, AuditConfig};
use crate::formatting::FormattingConfig;
use crate::input::{load_scenarios, InputGuard};
use crate::io::{create_writer, open_destination, OutputFormat};
use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub file: PathBuf,
    pub jobs: usize,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub strict: bool,
    pub formatting: FormattingConfig,
}

impl BatchConfig {
    pub fn new(file: PathBuf, jobs: usize, report: &ReportArgs) -> Self {
        Self {
            file,
            jobs,
            format: report.format,
            output: report.output.clone(),
            config: report.config.clone(),
            strict: report.strict,
            formatting: super::formatting_for(report),
        }
    }
}

/// Size the global rayon pool. Zero keeps rayon's default of one thread per core.
fn configure_thread_pool(jobs: usize) {
    if jobs == 0 {
        return;
    }
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(jobs).build_global() {
        tracing::warn!("Failed to configure thread pool: {e}");
    }
}

pub fn run_batch(command: &BatchConfig, audit_config: &AuditConfig) -> Result<BatchReport> {
    let scenarios = load_scenarios(&command.file)?;
    tracing::debug!(count = scenarios.len(), file = %command.file.display(), "scenarios loaded");

    let guard = command.strict.then(InputGuard::strict);
    Ok(evaluate_batch(&scenarios, audit_config, guard.as_ref())?)
}

pub fn handle_batch(command: BatchConfig) -> Result<()> {
    configure_thread_pool(command.jobs);

    let audit_config = load_config(command.config.as_deref()).context("Failed to load configuration")?;
    let report = run_batch(&command, &audit_config)?;

    let destination = open_destination(command.output.as_deref())?;
    let mut writer = create_writer(command.format, destination, command.formatting, audit_config.report);
    writer.write_batch(&report)?;

    if let Some(path) = &command.output {
        eprintln!("Batch report written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    const SCENARIOS: &str = indoc! {r#"
        [[scenario]]
        name = "steady"
        population_change_rate = -0.01
        income_change_rate = 0.0
        competitive_factor = 1.0
        prior_period_actual = 100.0
        stated_target = 105.0
        team_cost = 50.0

        [[scenario]]
        name = "bad cost"
        population_change_rate = 0.0
        income_change_rate = 0.0
        competitive_factor = 1.0
        prior_period_actual = 100.0
        stated_target = 100.0
        team_cost = -10.0
    "#};

    fn command(file: PathBuf, strict: bool) -> BatchConfig {
        BatchConfig {
            file,
            jobs: 0,
            format: OutputFormat::Json,
            output: None,
            config: None,
            strict,
            formatting: FormattingConfig::plain(),
        }
    }

    #[test]
    fn test_run_batch_reads_toml_scenarios() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.toml");
        fs::write(&path, SCENARIOS).unwrap();

        let report = run_batch(&command(path, false), &AuditConfig::default()).unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.scenarios[0].name, "steady");
    }

    #[test]
    fn test_strict_batch_names_offending_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.toml");
        fs::write(&path, SCENARIOS).unwrap();

        let err = run_batch(&command(path, true), &AuditConfig::default()).unwrap_err();
        assert!(err.to_string().contains("'bad cost'"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = run_batch(&command(dir.path().join("absent.toml"), false), &AuditConfig::default());
        assert!(result.is_err());
    }
}
