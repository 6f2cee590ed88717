//! CLI command implementations.
//!
//! Available commands:
//! - **audit**: Audit one sales target from flags or a scenario file
//! - **batch**: Audit every scenario in a file in parallel
//! - **init**: Write a default configuration file
//! - **levels**: List the competitive levels

pub mod audit;
pub mod batch;
pub mod init;
pub mod levels;

pub use audit::{handle_audit, AuditCommandConfig, InputSource};
pub use batch::{handle_batch, BatchConfig};
pub use init::init_config;
pub use levels::list_levels;

use crate::cli::ReportArgs;
use crate::formatting::FormattingConfig;

/// Pure function to create formatting configuration
pub(crate) fn create_formatting_config(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    }
}

/// Reports written to a file are always plain; terminal detection only
/// describes stdout.
pub(crate) fn formatting_for(report: &ReportArgs) -> FormattingConfig {
    create_formatting_config(report.plain || report.output.is_some())
}
