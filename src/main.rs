use anyhow::Result;
use target_audit::cli::{self, Commands};
use target_audit::commands::{self, AuditCommandConfig, BatchConfig, InputSource};
use target_audit::observability::init_tracing;

// Main orchestrator function
fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Audit {
            population_pct,
            income_pct,
            competition,
            prior_actual,
            target,
            team_cost,
            scenario,
            report,
        } => {
            init_tracing(report.verbosity);
            let source = match scenario {
                Some(path) => InputSource::File(path),
                None => InputSource::Flags {
                    population_pct,
                    income_pct,
                    competition,
                    prior_actual,
                    target,
                    team_cost,
                },
            };
            commands::handle_audit(AuditCommandConfig::new(source, &report))
        }
        Commands::Batch { file, jobs, report } => {
            init_tracing(report.verbosity);
            commands::handle_batch(BatchConfig::new(file, jobs, &report))
        }
        Commands::Init { force } => {
            init_tracing(0);
            commands::init_config(force)
        }
        Commands::Levels => {
            commands::list_levels();
            Ok(())
        }
    }
}
