//! Severity classification of the target gap.
//!
//! Tiers depend on the relative gap only, so scaling every amount by the same
//! positive constant never changes the verdict.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Audit severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AuditTier {
    /// Type A: consistent with market capacity and competitive position
    Feasible,

    /// Type B: close to the limit that field effort alone can cover
    YellowSignal,

    /// Type C: the target has left the market structure behind
    StructuralFailure,
}

impl AuditTier {
    pub fn label(&self) -> &'static str {
        match self {
            AuditTier::Feasible => "Feasible",
            AuditTier::YellowSignal => "Yellow Signal",
            AuditTier::StructuralFailure => "Structural Failure",
        }
    }

    pub fn type_code(&self) -> &'static str {
        match self {
            AuditTier::Feasible => "Type A",
            AuditTier::YellowSignal => "Type B",
            AuditTier::StructuralFailure => "Type C",
        }
    }

    /// Short severity word shown next to the gap figure
    pub fn severity(&self) -> &'static str {
        match self {
            AuditTier::Feasible => "Safe",
            AuditTier::YellowSignal => "Caution",
            AuditTier::StructuralFailure => "Critical",
        }
    }
}

impl fmt::Display for AuditTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Finer-grained gap band; the two feasible bands share one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapBand {
    /// Stated target at or below market potential
    Opportunity,
    /// Healthy stretch goal
    Stretch,
    Caution,
    Critical,
}

impl GapBand {
    pub fn tier(&self) -> AuditTier {
        match self {
            GapBand::Opportunity | GapBand::Stretch => AuditTier::Feasible,
            GapBand::Caution => AuditTier::YellowSignal,
            GapBand::Critical => AuditTier::StructuralFailure,
        }
    }
}

/// Upper bounds of the feasible and caution bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    /// Gaps above this are at least a yellow signal.
    #[serde(default = "default_caution_threshold")]
    pub caution_threshold: f64,

    /// Gaps above this are a structural failure.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            caution_threshold: default_caution_threshold(),
            failure_threshold: default_failure_threshold(),
        }
    }
}

fn default_caution_threshold() -> f64 {
    0.05
}
fn default_failure_threshold() -> f64 {
    0.15
}

/// Bucket a relative gap. Every boundary is inclusive on its lower band.
pub fn classify_gap(relative_gap: f64, thresholds: &TierThresholds) -> GapBand {
    if relative_gap > thresholds.failure_threshold {
        GapBand::Critical
    } else if relative_gap > thresholds.caution_threshold {
        GapBand::Caution
    } else if relative_gap > 0.0 {
        GapBand::Stretch
    } else {
        GapBand::Opportunity
    }
}

pub fn classify_tier(relative_gap: f64, thresholds: &TierThresholds) -> AuditTier {
    classify_gap(relative_gap, thresholds).tier()
}
