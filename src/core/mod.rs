//! Audit engine.
//!
//! Pure, synchronous and stateless: every call builds its records from the
//! six raw inputs and shares nothing with other calls, so callers may run
//! evaluations on as many threads as they like.

pub mod burnout;
pub mod engine;
pub mod gap;
pub mod market;
pub mod narrative;
pub mod target;
pub mod types;
pub mod verdict;

pub use burnout::{assess_risk, burnout_ratio, BurnoutCurve, RiskAssessment};
pub use engine::{evaluate, evaluate_default};
pub use gap::{analyze_gap, GapAnalysis};
pub use market::{market_capacity_index, MarketIndex, MarketPhase};
pub use narrative::{generate_commentary, generate_tier_report, NarrativeContext, ReportSettings, TierReport};
pub use target::{resolve_theoretical_target, DropGuard, TheoreticalTarget};
pub use types::{AuditInput, AuditOutcome, FinancialInputs, MarketInputs};
pub use verdict::{classify_gap, classify_tier, AuditTier, GapBand, TierThresholds};
