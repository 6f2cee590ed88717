//! Parallel evaluation of many scenarios.
//!
//! Evaluations share no state, so scenarios are simply mapped over the rayon
//! pool. Output order always matches input order.

use crate::config::AuditConfig;
use crate::core::{evaluate, AuditOutcome, AuditTier};
use crate::errors::{Error, Result};
use crate::input::{InputGuard, NamedScenario};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub outcome: AuditOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub feasible: usize,
    pub yellow_signal: usize,
    pub structural_failure: usize,
    pub crash_count: usize,
    pub total_wasted_cost: f64,
    /// Scenario with the highest burnout ratio, if any overshoots at all
    pub worst_scenario: Option<String>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[ScenarioOutcome]) -> Self {
        let mut summary = outcomes.iter().fold(
            BatchSummary {
                total: outcomes.len(),
                ..Default::default()
            },
            |mut acc, entry| {
                match entry.outcome.tier {
                    AuditTier::Feasible => acc.feasible += 1,
                    AuditTier::YellowSignal => acc.yellow_signal += 1,
                    AuditTier::StructuralFailure => acc.structural_failure += 1,
                }
                if entry.outcome.crash_triggered {
                    acc.crash_count += 1;
                }
                acc.total_wasted_cost += entry.outcome.wasted_cost;
                acc
            },
        );

        summary.worst_scenario = outcomes
            .iter()
            .filter(|entry| entry.outcome.burnout_ratio > 0.0)
            .max_by(|a, b| a.outcome.burnout_ratio.total_cmp(&b.outcome.burnout_ratio))
            .map(|entry| entry.name.clone());

        summary
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub scenarios: Vec<ScenarioOutcome>,
    pub summary: BatchSummary,
}

/// Evaluate every scenario in parallel.
///
/// With a guard, the whole batch is rejected when any scenario fails
/// validation; the error lists each offending scenario by name.
pub fn evaluate_batch(
    scenarios: &[NamedScenario],
    config: &AuditConfig,
    guard: Option<&InputGuard>,
) -> Result<BatchReport> {
    if let Some(guard) = guard {
        let problems: Vec<String> = scenarios
            .iter()
            .filter_map(|scenario| {
                let violations = guard.violations(&scenario.input);
                (!violations.is_empty())
                    .then(|| format!("'{}': {}", scenario.name, violations.join(", ")))
            })
            .collect();
        if !problems.is_empty() {
            return Err(Error::Validation(problems.join("; ")));
        }
    }

    let outcomes: Vec<ScenarioOutcome> = scenarios
        .par_iter()
        .map(|scenario| ScenarioOutcome {
            name: scenario.name.clone(),
            outcome: evaluate(&scenario.input, config),
        })
        .collect();
    tracing::info!(scenarios = outcomes.len(), "batch evaluated");

    let summary = BatchSummary::from_outcomes(&outcomes);
    Ok(BatchReport {
        scenarios: outcomes,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AuditInput;

    fn scenario(name: &str, stated: f64) -> NamedScenario {
        let mut input = AuditInput::default();
        input.financials.stated_target = stated;
        NamedScenario {
            name: name.to_string(),
            input,
        }
    }

    #[test]
    fn test_batch_preserves_order_and_counts_tiers() {
        let scenarios = vec![
            scenario("safe", 90.0),
            scenario("stretch", 102.0),
            scenario("yellow", 105.0),
            scenario("failure", 130.0),
        ];
        let report = evaluate_batch(&scenarios, &AuditConfig::default(), None).unwrap();

        let names: Vec<&str> = report.scenarios.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["safe", "stretch", "yellow", "failure"]);
        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.feasible, 2);
        assert_eq!(report.summary.yellow_signal, 1);
        assert_eq!(report.summary.structural_failure, 1);
        assert_eq!(report.summary.worst_scenario.as_deref(), Some("failure"));
    }

    #[test]
    fn test_batch_matches_single_evaluation() {
        let scenarios = vec![scenario("yellow", 105.0)];
        let report = evaluate_batch(&scenarios, &AuditConfig::default(), None).unwrap();
        let single = evaluate(&scenarios[0].input, &AuditConfig::default());
        assert_eq!(report.scenarios[0].outcome, single);
        assert_eq!(report.summary.total_wasted_cost, single.wasted_cost);
    }

    #[test]
    fn test_guard_rejects_whole_batch() {
        let mut bad = scenario("bad", 105.0);
        bad.input.financials.team_cost = -10.0;
        let scenarios = vec![scenario("ok", 100.0), bad];

        let err = evaluate_batch(&scenarios, &AuditConfig::default(), Some(&InputGuard::strict())).unwrap_err();
        assert!(err.to_string().contains("'bad'"));
        assert!(!err.to_string().contains("'ok'"));
    }

    #[test]
    fn test_no_worst_scenario_when_all_safe() {
        let report = evaluate_batch(&[scenario("safe", 80.0)], &AuditConfig::default(), None).unwrap();
        assert_eq!(report.summary.worst_scenario, None);
        assert_eq!(report.summary.crash_count, 0);
    }
}
