//! Theoretical target resolution and the structural drop guard.
//!
//! The guard has two independent checks. The crash flag follows the market
//! index alone; the floor follows the resolved value alone. With the default
//! thresholds they coincide for every reachable input; each threshold is
//! configured on its own.

use super::market::MarketIndex;
use serde::{Deserialize, Serialize};

/// Thresholds of the structural drop guard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropGuard {
    /// Market index below which the run is flagged as a crash.
    #[serde(default = "default_crash_index_threshold")]
    pub crash_index_threshold: f64,

    /// Share of the prior actual the theoretical target may not fall under.
    #[serde(default = "default_floor_ratio")]
    pub floor_ratio: f64,
}

impl Default for DropGuard {
    fn default() -> Self {
        Self {
            crash_index_threshold: default_crash_index_threshold(),
            floor_ratio: default_floor_ratio(),
        }
    }
}

fn default_crash_index_threshold() -> f64 {
    0.85
}
fn default_floor_ratio() -> f64 {
    0.85
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalTarget {
    /// Prior actual × market index × competitive factor, before clamping.
    pub raw_value: f64,
    pub floored_value: f64,
    pub crash_triggered: bool,
    pub floor_applied: bool,
}

/// Apply market and competitive trends to the prior actual, then the guard.
///
/// The floor is a one-sided clamp: it can raise the raw value, never lower it.
pub fn resolve_theoretical_target(
    prior_period_actual: f64,
    market: MarketIndex,
    competitive_factor: f64,
    guard: &DropGuard,
) -> TheoreticalTarget {
    let raw_value = prior_period_actual * market.value * competitive_factor;
    let crash_triggered = market.value < guard.crash_index_threshold;

    let floor = prior_period_actual * guard.floor_ratio;
    let floor_applied = raw_value < floor;
    let floored_value = if floor_applied { floor } else { raw_value };

    TheoreticalTarget {
        raw_value,
        floored_value,
        crash_triggered,
        floor_applied,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::market::market_capacity_index;

    #[test]
    fn test_no_guard_in_mild_contraction() {
        let target =
            resolve_theoretical_target(100.0, market_capacity_index(-0.01, 0.0), 1.0, &DropGuard::default());
        assert!((target.floored_value - 99.0).abs() < 1e-9);
        assert_eq!(target.raw_value, target.floored_value);
        assert!(!target.crash_triggered);
        assert!(!target.floor_applied);
    }

    #[test]
    fn test_crash_applies_floor() {
        let target = resolve_theoretical_target(
            100.0,
            market_capacity_index(-0.08, -0.08),
            0.90,
            &DropGuard::default(),
        );
        assert!(target.crash_triggered);
        assert!(target.floor_applied);
        assert!((target.raw_value - 76.176).abs() < 1e-9);
        assert!((target.floored_value - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_never_clamps_down() {
        let target = resolve_theoretical_target(
            100.0,
            market_capacity_index(0.05, 0.10),
            1.10,
            &DropGuard::default(),
        );
        assert!(!target.floor_applied);
        assert_eq!(target.floored_value, target.raw_value);
        assert!(target.floored_value > 100.0);
    }

    #[test]
    fn test_zero_prior_actual_resolves_to_zero() {
        let target = resolve_theoretical_target(
            0.0,
            market_capacity_index(-0.10, -0.10),
            0.90,
            &DropGuard::default(),
        );
        assert_eq!(target.floored_value, 0.0);
        assert!(!target.floor_applied);
        assert!(target.crash_triggered);
    }

    #[test]
    fn test_checks_are_independent() {
        // Floor fires from competitive pressure while the index stays above
        // the crash threshold.
        let guard = DropGuard {
            crash_index_threshold: 0.85,
            floor_ratio: 0.95,
        };
        let target = resolve_theoretical_target(100.0, market_capacity_index(-0.05, 0.0), 0.90, &guard);
        assert!(!target.crash_triggered);
        assert!(target.floor_applied);
        assert!((target.floored_value - 95.0).abs() < 1e-9);

        // Crash fires while the competitive factor keeps the value above the floor.
        let guard = DropGuard {
            crash_index_threshold: 0.85,
            floor_ratio: 0.50,
        };
        let target = resolve_theoretical_target(100.0, market_capacity_index(-0.10, -0.10), 1.0, &guard);
        assert!(target.crash_triggered);
        assert!(!target.floor_applied);
    }
}
