//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`, so report output on stdout
//! stays clean for piping. `TARGET_AUDIT_LOG` takes an `EnvFilter` directive
//! and overrides the verbosity flag.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "TARGET_AUDIT_LOG";

/// Map `-v` occurrences to a default filter directive.
pub fn verbosity_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
