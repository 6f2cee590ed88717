use serde::{Deserialize, Serialize};

/// Signed deviation of the stated target from the theoretical target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub absolute_gap: f64,
    /// Positive means the stated target overshoots the market model.
    pub relative_gap: f64,
}

/// Compare a stated target against the floored theoretical target.
///
/// A zero theoretical target has no meaningful ratio; the relative gap is
/// defined as 0 in that case rather than reported as an error.
pub fn analyze_gap(stated_target: f64, floored_target: f64) -> GapAnalysis {
    let absolute_gap = stated_target - floored_target;
    let relative_gap = if floored_target != 0.0 {
        absolute_gap / floored_target
    } else {
        0.0
    };

    GapAnalysis {
        absolute_gap,
        relative_gap,
    }
}
