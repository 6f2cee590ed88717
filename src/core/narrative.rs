//! Rule-based audit commentary.
//!
//! Every paragraph comes from a template table keyed by a classification
//! (market phase, gap band, tier) and rendered from the numeric results. The
//! tables mirror the classification tables one-to-one; nothing here decides a
//! tier on its own.

use super::market::{MarketIndex, MarketPhase};
use super::verdict::{AuditTier, GapBand};
use serde::{Deserialize, Serialize};

/// Report presentation settings that feed the templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Burnout ratio above which the financial-impact paragraph is emitted.
    #[serde(default = "default_impact_threshold")]
    pub impact_threshold: f64,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Unit suffix for amounts, e.g. "M" for millions.
    #[serde(default = "default_unit_label")]
    pub unit_label: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            impact_threshold: default_impact_threshold(),
            currency_symbol: default_currency_symbol(),
            unit_label: default_unit_label(),
        }
    }
}

fn default_impact_threshold() -> f64 {
    0.20
}
fn default_currency_symbol() -> String {
    "¥".to_string()
}
fn default_unit_label() -> String {
    "M".to_string()
}

impl ReportSettings {
    /// Format an amount the way every report surface shows money.
    pub fn money(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.1} {}", self.currency_symbol, -amount, self.unit_label)
        } else {
            format!("{}{:.1} {}", self.currency_symbol, amount, self.unit_label)
        }
    }
}

/// Numbers the templates interpolate.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub market_index: f64,
    pub market_phase: MarketPhase,
    pub relative_gap: f64,
    pub band: GapBand,
    pub burnout_ratio: f64,
    pub wasted_cost: f64,
    pub settings: &'a ReportSettings,
}

impl NarrativeContext<'_> {
    fn market_change_pct(&self) -> f64 {
        MarketIndex {
            value: self.market_index,
        }
        .change_percent()
    }

    fn gap_pct(&self) -> f64 {
        self.relative_gap * 100.0
    }

    fn risk_pct(&self) -> f64 {
        self.burnout_ratio * 100.0
    }
}

struct ParagraphRule<K> {
    key: K,
    render: fn(&NarrativeContext<'_>) -> String,
}

const MARKET_RULES: [ParagraphRule<MarketPhase>; 3] = [
    ParagraphRule {
        key: MarketPhase::Contraction,
        render: |ctx| {
            format!(
                "[Market Environment] The market capacity index is {:.3} ({:.1}%), so the market is in a contraction phase. \
                 Sales will shrink on their own if nothing changes: the business is facing a headwind.",
                ctx.market_index,
                ctx.market_change_pct()
            )
        },
    },
    ParagraphRule {
        key: MarketPhase::Flat,
        render: |_| {
            "[Market Environment] Market capacity is flat against the prior period. \
             Growth has to come from building a genuine competitive advantage."
                .to_string()
        },
    },
    ParagraphRule {
        key: MarketPhase::Expansion,
        render: |ctx| {
            format!(
                "[Market Environment] The market capacity index is {:.3} (+{:.1}%), a tailwind. \
                 Holding current share is enough to deliver natural growth.",
                ctx.market_index,
                ctx.market_change_pct()
            )
        },
    },
];

const TARGET_RULES: [ParagraphRule<GapBand>; 4] = [
    ParagraphRule {
        key: GapBand::Critical,
        render: |ctx| {
            format!(
                "[Target Validity] Detected an extremely high deviation of +{:.1}% from the theoretical target. \
                 This is an excessive top-up that ignores market growth and carries a structural failure risk.",
                ctx.gap_pct()
            )
        },
    },
    ParagraphRule {
        key: GapBand::Caution,
        render: |ctx| {
            format!(
                "[Target Validity] The target deviates +{:.1}% from the theoretical target. \
                 It has reached the limit that field effort alone can cover and may erode the organization's ability to self-correct.",
                ctx.gap_pct()
            )
        },
    },
    ParagraphRule {
        key: GapBand::Stretch,
        render: |ctx| {
            format!(
                "[Target Validity] The deviation of {:.1}% is within a healthy stretch-goal range.",
                ctx.gap_pct()
            )
        },
    },
    ParagraphRule {
        key: GapBand::Opportunity,
        render: |_| {
            "[Target Validity] The company target is below the market's potential. \
             There is an opportunity to expand share further."
                .to_string()
        },
    },
];

fn render_impact(ctx: &NarrativeContext<'_>) -> String {
    format!(
        "[Financial Impact] Organizational burnout risk has risen to {:.0}%. \
         The target puts {} of team cost at risk of being spent without results, through attrition and lost productivity.",
        ctx.risk_pct(),
        ctx.settings.money(ctx.wasted_cost)
    )
}

fn render_rule<K: PartialEq>(rules: &[ParagraphRule<K>], key: K, ctx: &NarrativeContext<'_>) -> Option<String> {
    rules
        .iter()
        .find(|rule| rule.key == key)
        .map(|rule| (rule.render)(ctx))
}

/// Ordered commentary: market environment, target validity, then financial
/// impact when the burnout ratio exceeds the configured threshold.
pub fn generate_commentary(ctx: &NarrativeContext<'_>) -> Vec<String> {
    let mut paragraphs = Vec::with_capacity(3);
    paragraphs.extend(render_rule(&MARKET_RULES, ctx.market_phase, ctx));
    paragraphs.extend(render_rule(&TARGET_RULES, ctx.band, ctx));
    if ctx.burnout_ratio > ctx.settings.impact_threshold {
        paragraphs.push(render_impact(ctx));
    }
    paragraphs
}

/// Tier verdict block shown next to the commentary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReport {
    pub tier: AuditTier,
    /// e.g. "Type B: Yellow Signal"
    pub headline: String,
    /// Gap figure with its severity word
    pub status: String,
    pub summary: String,
    pub section_title: String,
    pub items: Vec<String>,
}

struct ReportTemplate {
    section_title: &'static str,
    summary: fn(&NarrativeContext<'_>) -> String,
    items: fn(&NarrativeContext<'_>) -> Vec<String>,
}

const FEASIBLE_REPORT: ReportTemplate = ReportTemplate {
    section_title: "Findings",
    summary: |_| "The target is consistent with the market environment and competitive position.".to_string(),
    items: |_| {
        vec![
            "A sound plan that can sustain growth.".to_string(),
            "A logically strong target that maximizes return on the invested resources.".to_string(),
        ]
    },
};

const YELLOW_SIGNAL_REPORT: ReportTemplate = ReportTemplate {
    section_title: "Findings",
    summary: |_| {
        "The target is too high for the market's potential and is approaching the limit that field effort can cover."
            .to_string()
    },
    items: |ctx| {
        vec![
            format!("Burnout risk ({:.0}%) is trending upward.", ctx.risk_pct()),
            "Organizational debt from attrition and falling motivation may be starting to build up.".to_string(),
        ]
    },
};

const STRUCTURAL_FAILURE_REPORT: ReportTemplate = ReportTemplate {
    section_title: "Recommended actions",
    summary: |ctx| {
        format!(
            "The target has departed entirely from the market structure. Burnout risk has reached {:.0}%, \
             and much of the invested resource is likely unrecoverable.",
            ctx.risk_pct()
        )
    },
    items: |_| {
        vec![
            "Force a downward revision of the target.".to_string(),
            "Withdraw strategically from unprofitable areas.".to_string(),
        ]
    },
};

fn report_template(tier: AuditTier) -> &'static ReportTemplate {
    match tier {
        AuditTier::Feasible => &FEASIBLE_REPORT,
        AuditTier::YellowSignal => &YELLOW_SIGNAL_REPORT,
        AuditTier::StructuralFailure => &STRUCTURAL_FAILURE_REPORT,
    }
}

fn format_status(tier: AuditTier, gap_pct: f64) -> String {
    match tier {
        AuditTier::Feasible => format!("Gap: {:.1}% ({})", gap_pct, tier.severity()),
        _ => format!("Gap: +{:.1}% ({})", gap_pct, tier.severity()),
    }
}

pub fn generate_tier_report(ctx: &NarrativeContext<'_>) -> TierReport {
    let tier = ctx.band.tier();
    let template = report_template(tier);

    TierReport {
        tier,
        headline: format!("{}: {}", tier.type_code(), tier.label()),
        status: format_status(tier, ctx.gap_pct()),
        summary: (template.summary)(ctx),
        section_title: template.section_title.to_string(),
        items: (template.items)(ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(settings: &ReportSettings, index: f64, phase: MarketPhase, gap: f64, band: GapBand, risk: f64) -> NarrativeContext<'_> {
        NarrativeContext {
            market_index: index,
            market_phase: phase,
            relative_gap: gap,
            band,
            burnout_ratio: risk,
            wasted_cost: 50.0 * risk,
            settings,
        }
    }

    #[test]
    fn test_market_paragraph_per_phase() {
        let settings = ReportSettings::default();
        let shrinking = generate_commentary(&context(&settings, 0.99, MarketPhase::Contraction, 0.0, GapBand::Opportunity, 0.0));
        assert!(shrinking[0].contains("0.990 (-1.0%)"));
        assert!(shrinking[0].contains("contraction"));

        let flat = generate_commentary(&context(&settings, 1.0, MarketPhase::Flat, 0.0, GapBand::Opportunity, 0.0));
        assert!(flat[0].contains("flat"));

        let growing = generate_commentary(&context(&settings, 1.05, MarketPhase::Expansion, 0.0, GapBand::Opportunity, 0.0));
        assert!(growing[0].contains("1.050 (+5.0%)"));
        assert!(growing[0].contains("tailwind"));
    }

    #[test]
    fn test_target_paragraph_per_band() {
        let settings = ReportSettings::default();
        let cases = [
            (GapBand::Critical, 0.20, "+20.0%"),
            (GapBand::Caution, 0.08, "+8.0%"),
            (GapBand::Stretch, 0.03, "3.0%"),
            (GapBand::Opportunity, -0.10, "opportunity"),
        ];
        for (band, gap, needle) in cases {
            let paragraphs = generate_commentary(&context(&settings, 1.0, MarketPhase::Flat, gap, band, 0.0));
            assert_eq!(paragraphs.len(), 2);
            assert!(paragraphs[1].contains(needle), "{:?}: {}", band, paragraphs[1]);
        }
    }

    #[test]
    fn test_impact_paragraph_only_above_threshold() {
        let settings = ReportSettings::default();
        let at_threshold = generate_commentary(&context(&settings, 1.0, MarketPhase::Flat, 0.08, GapBand::Caution, 0.20));
        assert_eq!(at_threshold.len(), 2);

        let above = generate_commentary(&context(&settings, 1.0, MarketPhase::Flat, 0.20, GapBand::Critical, 0.8647));
        assert_eq!(above.len(), 3);
        assert!(above[2].contains("86%"));
        assert!(above[2].contains("¥43.2 M"));
    }

    #[test]
    fn test_tier_report_headlines() {
        let settings = ReportSettings::default();
        let report = generate_tier_report(&context(&settings, 1.0, MarketPhase::Flat, 0.25, GapBand::Critical, 0.95));
        assert_eq!(report.headline, "Type C: Structural Failure");
        assert_eq!(report.status, "Gap: +25.0% (Critical)");
        assert_eq!(report.section_title, "Recommended actions");
        assert!(report.summary.contains("95%"));

        let report = generate_tier_report(&context(&settings, 1.0, MarketPhase::Flat, 0.06, GapBand::Caution, 0.1));
        assert_eq!(report.headline, "Type B: Yellow Signal");
        assert!(report.items[0].contains("(10%)"));

        let report = generate_tier_report(&context(&settings, 1.0, MarketPhase::Flat, -0.5, GapBand::Opportunity, 0.0));
        assert_eq!(report.headline, "Type A: Feasible");
        assert_eq!(report.status, "Gap: -50.0% (Safe)");
    }

    #[test]
    fn test_money_formatting() {
        let settings = ReportSettings {
            currency_symbol: "$".to_string(),
            unit_label: "K".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.money(12.34), "$12.3 K");
        assert_eq!(settings.money(-6.0), "-$6.0 K");
    }
}
