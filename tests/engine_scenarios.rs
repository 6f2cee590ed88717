//! End-to-end checks of the audit pipeline through the public API.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use target_audit::{
    evaluate, evaluate_default, AuditConfig, AuditInput, AuditTier, DropGuard, FinancialInputs,
    MarketInputs,
};

fn input(pop: f64, income: f64, factor: f64, prior: f64, stated: f64, cost: f64) -> AuditInput {
    AuditInput::new(
        MarketInputs {
            population_change_rate: pop,
            income_change_rate: income,
            competitive_factor: factor,
        },
        FinancialInputs {
            prior_period_actual: prior,
            stated_target: stated,
            team_cost: cost,
        },
    )
}

#[test]
fn test_default_scenario_is_yellow_signal() {
    let outcome = evaluate_default(&input(-0.01, 0.0, 1.0, 100.0, 105.0, 50.0));

    assert!((outcome.market_index - 0.99).abs() < 1e-12);
    assert!((outcome.theoretical_target - 99.0).abs() < 1e-9);
    assert!((outcome.absolute_gap - 6.0).abs() < 1e-9);
    assert!((outcome.relative_gap - 6.0 / 99.0).abs() < 1e-12);
    assert_eq!(outcome.tier, AuditTier::YellowSignal);
    assert!(!outcome.crash_triggered);

    let at_midpoint = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 110.0, 50.0));
    assert!((at_midpoint.relative_gap - 0.10).abs() < 1e-12);
    assert!(outcome.burnout_ratio > 0.0);
    assert!(outcome.burnout_ratio < at_midpoint.burnout_ratio);
}

#[test]
fn test_market_crash_applies_floor() {
    let outcome = evaluate_default(&input(-0.08, -0.08, 0.90, 100.0, 105.0, 50.0));

    assert!((outcome.market_index - 0.8464).abs() < 1e-12);
    assert!(outcome.crash_triggered);
    assert!((outcome.raw_theoretical_target - 76.176).abs() < 1e-9);
    assert!(outcome.floor_applied);
    assert!((outcome.theoretical_target - 85.0).abs() < 1e-9);
    assert_eq!(outcome.tier, AuditTier::StructuralFailure);
}

#[test]
fn test_zero_gap_is_feasible_without_burnout() {
    let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 100.0, 50.0));
    assert_eq!(outcome.relative_gap, 0.0);
    assert_eq!(outcome.burnout_ratio, 0.0);
    assert_eq!(outcome.wasted_cost, 0.0);
    assert_eq!(outcome.tier, AuditTier::Feasible);
}

#[test]
fn test_sandbagged_target_is_feasible() {
    let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 50.0, 50.0));
    assert!((outcome.relative_gap + 0.50).abs() < 1e-12);
    assert_eq!(outcome.tier, AuditTier::Feasible);
    assert_eq!(outcome.burnout_ratio, 0.0);
    assert_eq!(outcome.wasted_cost, 0.0);
}

#[test]
fn test_zero_prior_actual_does_not_fail() {
    let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 0.0, 10.0, 50.0));
    assert_eq!(outcome.theoretical_target, 0.0);
    assert_eq!(outcome.relative_gap, 0.0);
    assert_eq!(outcome.tier, AuditTier::Feasible);
}

#[test]
fn test_decoupled_guard_thresholds() {
    let mut config = AuditConfig::default();
    config.guard = DropGuard {
        crash_index_threshold: 0.70,
        floor_ratio: 0.85,
    };
    // index 0.8464 is no longer a crash, but the floor still holds
    let outcome = evaluate(&input(-0.08, -0.08, 0.90, 100.0, 105.0, 50.0), &config);
    assert!(!outcome.crash_triggered);
    assert!(outcome.floor_applied);
    assert!((outcome.theoretical_target - 85.0).abs() < 1e-9);
}

fn arb_input() -> impl Strategy<Value = AuditInput> {
    (
        -0.10f64..0.05,
        -0.10f64..0.10,
        prop::sample::select(vec![1.10, 1.05, 1.00, 0.95, 0.90]),
        1.0f64..10_000.0,
        0.0f64..20_000.0,
        0.0f64..1_000.0,
    )
        .prop_map(|(pop, income, factor, prior, stated, cost)| {
            input(pop, income, factor, prior, stated, cost)
        })
}

proptest! {
    #[test]
    fn prop_crash_iff_index_below_threshold(audit in arb_input()) {
        let outcome = evaluate_default(&audit);
        prop_assert_eq!(outcome.crash_triggered, outcome.market_index < 0.85);
        if outcome.crash_triggered {
            prop_assert!(outcome.theoretical_target >= audit.financials.prior_period_actual * 0.85);
        }
    }

    #[test]
    fn prop_wasted_cost_is_cost_times_ratio(audit in arb_input()) {
        let outcome = evaluate_default(&audit);
        prop_assert!((0.0..=1.0).contains(&outcome.burnout_ratio));
        prop_assert_eq!(outcome.wasted_cost, audit.financials.team_cost * outcome.burnout_ratio);
        if outcome.relative_gap <= 0.0 {
            prop_assert_eq!(outcome.burnout_ratio, 0.0);
        }
    }

    // Powers of two scale every amount exactly, so ratios must match bit for bit.
    #[test]
    fn prop_verdict_is_scale_invariant(
        audit in arb_input(),
        scale in prop::sample::select(vec![0.25, 0.5, 2.0, 8.0, 1024.0]),
    ) {
        let base = evaluate_default(&audit);
        let scaled = evaluate_default(&audit.scaled(scale));

        prop_assert_eq!(scaled.relative_gap, base.relative_gap);
        prop_assert_eq!(scaled.burnout_ratio, base.burnout_ratio);
        prop_assert_eq!(scaled.tier, base.tier);
        prop_assert_eq!(scaled.theoretical_target, base.theoretical_target * scale);
        prop_assert_eq!(scaled.wasted_cost, base.wasted_cost * scale);
    }
}
