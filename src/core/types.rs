//! Input and output records at the engine boundary.

use super::burnout::RiskAssessment;
use super::gap::GapAnalysis;
use super::market::{MarketIndex, MarketPhase};
use super::narrative::TierReport;
use super::target::TheoreticalTarget;
use super::verdict::{AuditTier, GapBand};
use serde::{Deserialize, Serialize};

/// Macro-environment and competitive context for one audit.
///
/// Rates are fractions (`-0.01` for a 1% decline), not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketInputs {
    pub population_change_rate: f64,
    pub income_change_rate: f64,
    pub competitive_factor: f64,
}

/// Company figures for one audit. All amounts share one currency and unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    pub prior_period_actual: f64,
    pub stated_target: f64,
    pub team_cost: f64,
}

/// The six raw values the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuditInput {
    #[serde(flatten)]
    pub market: MarketInputs,
    #[serde(flatten)]
    pub financials: FinancialInputs,
}

impl AuditInput {
    pub fn new(market: MarketInputs, financials: FinancialInputs) -> Self {
        Self { market, financials }
    }

    /// Multiply every monetary amount by `factor`, leaving rates untouched.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            market: self.market,
            financials: FinancialInputs {
                prior_period_actual: self.financials.prior_period_actual * factor,
                stated_target: self.financials.stated_target * factor,
                team_cost: self.financials.team_cost * factor,
            },
        }
    }
}

impl Default for AuditInput {
    /// Matches the defaults of the interactive simulator.
    fn default() -> Self {
        Self {
            market: MarketInputs {
                population_change_rate: -0.01,
                income_change_rate: 0.0,
                competitive_factor: 1.00,
            },
            financials: FinancialInputs {
                prior_period_actual: 100.0,
                stated_target: 105.0,
                team_cost: 50.0,
            },
        }
    }
}

/// Everything a presentation layer needs from one evaluation.
///
/// The first nine fields form the stable output record; the remainder carry
/// intermediate values that reports display alongside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub market_index: f64,
    pub theoretical_target: f64,
    pub crash_triggered: bool,
    pub absolute_gap: f64,
    pub relative_gap: f64,
    pub burnout_ratio: f64,
    pub wasted_cost: f64,
    pub tier: AuditTier,
    pub narrative_paragraphs: Vec<String>,

    pub input: AuditInput,
    pub market_phase: MarketPhase,
    pub raw_theoretical_target: f64,
    pub floor_applied: bool,
    pub band: GapBand,
    pub report: TierReport,
}

impl AuditOutcome {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        input: AuditInput,
        market: MarketIndex,
        target: TheoreticalTarget,
        gap: GapAnalysis,
        risk: RiskAssessment,
        band: GapBand,
        narrative_paragraphs: Vec<String>,
        report: TierReport,
    ) -> Self {
        Self {
            market_index: market.value,
            theoretical_target: target.floored_value,
            crash_triggered: target.crash_triggered,
            absolute_gap: gap.absolute_gap,
            relative_gap: gap.relative_gap,
            burnout_ratio: risk.burnout_ratio,
            wasted_cost: risk.wasted_cost,
            tier: band.tier(),
            narrative_paragraphs,
            input,
            market_phase: market.phase(),
            raw_theoretical_target: target.raw_value,
            floor_applied: target.floor_applied,
            band,
            report,
        }
    }

    /// Signed market change against a flat market, in percent.
    pub fn market_change_percent(&self) -> f64 {
        MarketIndex {
            value: self.market_index,
        }
        .change_percent()
    }

    /// True when the stated target exceeds what the market supports.
    pub fn is_overloaded(&self) -> bool {
        self.absolute_gap > 0.0
    }
}
