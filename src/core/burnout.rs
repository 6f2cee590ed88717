//! Burnout risk model.
//!
//! The relative gap is pushed through a logistic curve that is re-anchored so
//! a zero gap maps to exactly 0 and an unbounded gap approaches 1. The
//! steepest rise sits at the curve midpoint (a 10-point overshoot by default).

use serde::{Deserialize, Serialize};

/// Shape of the normalized logistic curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurnoutCurve {
    /// Relative gap at which the raw logistic reaches one half.
    #[serde(default = "default_midpoint")]
    pub midpoint: f64,

    /// Logistic growth rate.
    #[serde(default = "default_steepness")]
    pub steepness: f64,
}

impl Default for BurnoutCurve {
    fn default() -> Self {
        Self {
            midpoint: default_midpoint(),
            steepness: default_steepness(),
        }
    }
}

fn default_midpoint() -> f64 {
    0.10
}
fn default_steepness() -> f64 {
    20.0
}

impl BurnoutCurve {
    /// Plain logistic value at `x`, or `None` when `e^x` is not representable.
    fn logistic(&self, x: f64) -> Option<f64> {
        let exp = (-self.steepness * (x - self.midpoint)).exp();
        exp.is_finite().then(|| 1.0 / (1.0 + exp))
    }

    /// Map a relative gap to a burnout ratio in `[0, 1]`.
    pub fn ratio(&self, relative_gap: f64) -> f64 {
        if relative_gap.is_nan() || relative_gap <= 0.0 {
            return 0.0;
        }

        let (raw, base) = match (self.logistic(relative_gap), self.logistic(0.0)) {
            (Some(raw), Some(base)) => (raw, base),
            // Saturated: the curve's limit for an unbounded gap.
            _ => return 1.0,
        };

        let normalized = (raw - base) / (1.0 - base);
        if normalized.is_nan() {
            return 1.0;
        }
        normalized.clamp(0.0, 1.0)
    }
}

/// Burnout ratio under the default curve (midpoint 0.10, steepness 20).
pub fn burnout_ratio(relative_gap: f64) -> f64 {
    BurnoutCurve::default().ratio(relative_gap)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub burnout_ratio: f64,
    /// Share of team cost presumed lost to attrition and lost productivity.
    pub wasted_cost: f64,
}

pub fn assess_risk(relative_gap: f64, team_cost: f64, curve: &BurnoutCurve) -> RiskAssessment {
    let burnout_ratio = curve.ratio(relative_gap);
    RiskAssessment {
        burnout_ratio,
        wasted_cost: team_cost * burnout_ratio,
    }
}
