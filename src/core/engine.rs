//! The five-stage audit pipeline.
//!
//! Market index → theoretical target → gap → burnout risk → verdict. Each
//! stage is a pure function of the previous stage's output and the config;
//! nothing here performs I/O.

use super::burnout::assess_risk;
use super::gap::analyze_gap;
use super::market::market_capacity_index;
use super::narrative::{generate_commentary, generate_tier_report, NarrativeContext};
use super::target::resolve_theoretical_target;
use super::types::{AuditInput, AuditOutcome};
use super::verdict::classify_gap;
use crate::config::AuditConfig;
use tracing::{debug, debug_span};

/// Evaluate one audit.
///
/// Never fails for finite inputs: degenerate cases (zero theoretical target,
/// saturated exponentials) resolve to defined values. Inputs are not range
/// checked here; see [`crate::input::InputGuard`] for boundary validation.
pub fn evaluate(input: &AuditInput, config: &AuditConfig) -> AuditOutcome {
    let _span = debug_span!("evaluate").entered();
    let market = &input.market;
    let financials = &input.financials;

    let index = market_capacity_index(market.population_change_rate, market.income_change_rate);
    debug!(market_index = index.value, "market capacity index");

    let target = resolve_theoretical_target(
        financials.prior_period_actual,
        index,
        market.competitive_factor,
        &config.guard,
    );
    debug!(
        raw = target.raw_value,
        floored = target.floored_value,
        crash = target.crash_triggered,
        floor_applied = target.floor_applied,
        "theoretical target"
    );

    let gap = analyze_gap(financials.stated_target, target.floored_value);
    debug!(absolute = gap.absolute_gap, relative = gap.relative_gap, "target gap");

    let risk = assess_risk(gap.relative_gap, financials.team_cost, &config.burnout);
    debug!(
        burnout_ratio = risk.burnout_ratio,
        wasted_cost = risk.wasted_cost,
        "burnout risk"
    );

    let band = classify_gap(gap.relative_gap, &config.tiers);
    let ctx = NarrativeContext {
        market_index: index.value,
        market_phase: index.phase(),
        relative_gap: gap.relative_gap,
        band,
        burnout_ratio: risk.burnout_ratio,
        wasted_cost: risk.wasted_cost,
        settings: &config.report,
    };
    let paragraphs = generate_commentary(&ctx);
    let report = generate_tier_report(&ctx);
    debug!(?band, tier = %band.tier(), paragraphs = paragraphs.len(), "verdict");

    AuditOutcome::assemble(*input, index, target, gap, risk, band, paragraphs, report)
}

/// Evaluate with the default thresholds and curve.
pub fn evaluate_default(input: &AuditInput) -> AuditOutcome {
    evaluate(input, &AuditConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{FinancialInputs, MarketInputs};
    use crate::core::verdict::{AuditTier, GapBand};

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
        let outcome = evaluate_default(&AuditInput::default());
        assert!((outcome.market_index - 0.99).abs() < 1e-12);
        assert!((outcome.theoretical_target - 99.0).abs() < 1e-9);
        assert!((outcome.absolute_gap - 6.0).abs() < 1e-9);
        assert!((outcome.relative_gap - 0.0606).abs() < 1e-4);
        assert_eq!(outcome.tier, AuditTier::YellowSignal);
        assert!(!outcome.crash_triggered);

        let at_midpoint = crate::core::burnout::burnout_ratio(0.10);
        assert!(outcome.burnout_ratio > 0.0);
        assert!(outcome.burnout_ratio < at_midpoint);
        assert_eq!(outcome.wasted_cost, 50.0 * outcome.burnout_ratio);
    }

    #[test]
    fn test_crash_scenario_floors_target() {
        let outcome = evaluate_default(&input(-0.08, -0.08, 0.90, 100.0, 90.0, 50.0));
        assert!(outcome.crash_triggered);
        assert!(outcome.floor_applied);
        assert!((outcome.raw_theoretical_target - 76.176).abs() < 1e-9);
        assert!((outcome.theoretical_target - 85.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_gap_is_feasible() {
        let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 100.0, 50.0));
        assert_eq!(outcome.relative_gap, 0.0);
        assert_eq!(outcome.burnout_ratio, 0.0);
        assert_eq!(outcome.tier, AuditTier::Feasible);
        assert_eq!(outcome.band, GapBand::Opportunity);
    }

    #[test]
    fn test_far_below_target_is_opportunity() {
        let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 50.0, 50.0));
        assert_eq!(outcome.relative_gap, -0.5);
        assert_eq!(outcome.tier, AuditTier::Feasible);
        assert_eq!(outcome.burnout_ratio, 0.0);
        assert_eq!(outcome.wasted_cost, 0.0);
        assert!(!outcome.is_overloaded());
    }

    #[test]
    fn test_zero_prior_actual_is_degenerate_not_error() {
        let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 0.0, 10.0, 50.0));
        assert_eq!(outcome.theoretical_target, 0.0);
        assert_eq!(outcome.relative_gap, 0.0);
        assert_eq!(outcome.tier, AuditTier::Feasible);
    }

    #[test]
    fn test_impact_paragraph_follows_burnout() {
        let outcome = evaluate_default(&input(0.0, 0.0, 1.0, 100.0, 125.0, 50.0));
        assert_eq!(outcome.tier, AuditTier::StructuralFailure);
        assert_eq!(outcome.narrative_paragraphs.len(), 3);
        assert!(outcome.narrative_paragraphs[2].starts_with("[Financial Impact]"));
    }
}
