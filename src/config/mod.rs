//! Audit configuration.
//!
//! Every threshold the engine uses is a config value with a serde default, so
//! an empty `.target-audit.toml` reproduces the built-in behaviour exactly.

mod loader;

pub use loader::{directory_ancestors, discover_config, load_config, parse_and_validate_config, CONFIG_FILE_NAME};

use crate::core::{BurnoutCurve, DropGuard, ReportSettings, TierThresholds};
use serde::{Deserialize, Serialize};

/// Largest exponent at a zero gap that keeps the curve's baseline representable.
const MAX_LOGISTIC_EXPONENT: f64 = 700.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub guard: DropGuard,

    #[serde(default)]
    pub burnout: BurnoutCurve,

    #[serde(default)]
    pub tiers: TierThresholds,

    #[serde(default)]
    pub report: ReportSettings,
}

impl AuditConfig {
    /// Check that every value keeps the engine's guarantees intact.
    ///
    /// Returns every problem found, not only the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let finite = [
            ("guard.crash_index_threshold", self.guard.crash_index_threshold),
            ("guard.floor_ratio", self.guard.floor_ratio),
            ("burnout.midpoint", self.burnout.midpoint),
            ("burnout.steepness", self.burnout.steepness),
            ("tiers.caution_threshold", self.tiers.caution_threshold),
            ("tiers.failure_threshold", self.tiers.failure_threshold),
            ("report.impact_threshold", self.report.impact_threshold),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                errors.push(format!("{name} must be a finite number, got {value}"));
            }
        }

        if !(self.guard.floor_ratio > 0.0 && self.guard.floor_ratio <= 1.0) {
            errors.push(format!(
                "guard.floor_ratio must be in (0, 1], got {}",
                self.guard.floor_ratio
            ));
        }
        if self.guard.crash_index_threshold <= 0.0 {
            errors.push(format!(
                "guard.crash_index_threshold must be positive, got {}",
                self.guard.crash_index_threshold
            ));
        }
        if self.burnout.steepness <= 0.0 {
            errors.push(format!(
                "burnout.steepness must be positive, got {}",
                self.burnout.steepness
            ));
        }
        if self.burnout.steepness * self.burnout.midpoint > MAX_LOGISTIC_EXPONENT {
            errors.push(format!(
                "burnout.steepness × burnout.midpoint must not exceed {MAX_LOGISTIC_EXPONENT}, got {}",
                self.burnout.steepness * self.burnout.midpoint
            ));
        }
        if self.burnout.midpoint < 0.0 {
            errors.push(format!(
                "burnout.midpoint must not be negative, got {}",
                self.burnout.midpoint
            ));
        }
        if self.tiers.caution_threshold < 0.0 {
            errors.push(format!(
                "tiers.caution_threshold must not be negative, got {}",
                self.tiers.caution_threshold
            ));
        }
        if self.tiers.failure_threshold < self.tiers.caution_threshold {
            errors.push(format!(
                "tiers.failure_threshold ({}) must not be below tiers.caution_threshold ({})",
                self.tiers.failure_threshold, self.tiers.caution_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.report.impact_threshold) {
            errors.push(format!(
                "report.impact_threshold must be in [0, 1], got {}",
                self.report.impact_threshold
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The default configuration as commented TOML, used by `init`.
    pub fn default_toml() -> &'static str {
        DEFAULT_CONFIG_TOML
    }
}

const DEFAULT_CONFIG_TOML: &str = r#"# target-audit configuration

[guard]
# Market index below which the run is flagged as a market crash
crash_index_threshold = 0.85
# Theoretical target never falls below this share of the prior actual
floor_ratio = 0.85

[burnout]
# Relative gap with the steepest rise in burnout risk
midpoint = 0.10
steepness = 20.0

[tiers]
# Gap above which a target is a yellow signal
caution_threshold = 0.05
# Gap above which a target is a structural failure
failure_threshold = 0.15

[report]
# Burnout ratio above which the financial impact is reported
impact_threshold = 0.20
currency_symbol = "¥"
unit_label = "M"
"#;
