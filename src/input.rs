//! Input boundary: competitive levels, unit conversion, scenario files and the
//! optional strict guard.
//!
//! The engine accepts any finite numbers. Range checks live here so callers
//! that want them can opt in without changing the engine's permissive
//! behaviour for scenario exploration.

use crate::core::{AuditInput, FinancialInputs, MarketInputs};
use crate::errors::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Change in the company's competitive position, as a share coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompetitionLevel {
    /// Running ahead and gaining share (1.10)
    Dominant,
    /// Improving, competitors withdrawing (1.05)
    Improving,
    /// Stable, no change (1.00)
    #[default]
    Stable,
    /// Worsening, more entrants (0.95)
    Worsening,
    /// Intense price competition (0.90)
    Intense,
}

impl CompetitionLevel {
    pub const ALL: [CompetitionLevel; 5] = [
        CompetitionLevel::Dominant,
        CompetitionLevel::Improving,
        CompetitionLevel::Stable,
        CompetitionLevel::Worsening,
        CompetitionLevel::Intense,
    ];

    pub fn factor(&self) -> f64 {
        match self {
            CompetitionLevel::Dominant => 1.10,
            CompetitionLevel::Improving => 1.05,
            CompetitionLevel::Stable => 1.00,
            CompetitionLevel::Worsening => 0.95,
            CompetitionLevel::Intense => 0.90,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CompetitionLevel::Dominant => "Running ahead, gaining share",
            CompetitionLevel::Improving => "Improving, fewer competitors",
            CompetitionLevel::Stable => "Stable, unchanged",
            CompetitionLevel::Worsening => "Worsening, more entrants",
            CompetitionLevel::Intense => "Intense price competition",
        }
    }

    /// Match a raw coefficient to one of the five levels.
    pub fn from_factor(factor: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.factor() - factor).abs() < 1e-9)
    }
}

impl fmt::Display for CompetitionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.description(), self.factor())
    }
}

/// Convert a percentage figure (as typed on the command line) to a fraction.
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}

/// Build an engine input from command-line style values.
pub fn input_from_percentages(
    population_pct: f64,
    income_pct: f64,
    competition: CompetitionLevel,
    prior_period_actual: f64,
    stated_target: f64,
    team_cost: f64,
) -> AuditInput {
    AuditInput::new(
        MarketInputs {
            population_change_rate: percent_to_fraction(population_pct),
            income_change_rate: percent_to_fraction(income_pct),
            competitive_factor: competition.factor(),
        },
        FinancialInputs {
            prior_period_actual,
            stated_target,
            team_cost,
        },
    )
}

/// Closed range accepted for one input field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Boundary validation for callers that want to reject meaningless inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputGuard {
    pub population_range: FieldRange,
    pub income_range: FieldRange,
    /// Require the competitive factor to be one of the five levels.
    pub require_known_factor: bool,
}

impl Default for InputGuard {
    fn default() -> Self {
        Self::strict()
    }
}

impl InputGuard {
    /// Ranges of the interactive simulator's sliders.
    pub fn strict() -> Self {
        Self {
            population_range: FieldRange::new(-0.10, 0.05),
            income_range: FieldRange::new(-0.10, 0.10),
            require_known_factor: true,
        }
    }

    /// Collect every violation in `input`.
    pub fn violations(&self, input: &AuditInput) -> Vec<String> {
        let market = &input.market;
        let financials = &input.financials;
        let mut violations = Vec::new();

        let fields = [
            ("population_change_rate", market.population_change_rate),
            ("income_change_rate", market.income_change_rate),
            ("competitive_factor", market.competitive_factor),
            ("prior_period_actual", financials.prior_period_actual),
            ("stated_target", financials.stated_target),
            ("team_cost", financials.team_cost),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                violations.push(format!("{name} must be finite, got {value}"));
            }
        }

        check_range(
            &mut violations,
            "population_change_rate",
            market.population_change_rate,
            self.population_range,
        );
        check_range(
            &mut violations,
            "income_change_rate",
            market.income_change_rate,
            self.income_range,
        );

        if self.require_known_factor
            && market.competitive_factor.is_finite()
            && CompetitionLevel::from_factor(market.competitive_factor).is_none()
        {
            violations.push(format!(
                "competitive_factor must be one of 1.10, 1.05, 1.00, 0.95, 0.90, got {}",
                market.competitive_factor
            ));
        }
        if financials.prior_period_actual < 0.0 {
            violations.push(format!(
                "prior_period_actual must not be negative, got {}",
                financials.prior_period_actual
            ));
        }
        if financials.team_cost < 0.0 {
            violations.push(format!(
                "team_cost must not be negative, got {}",
                financials.team_cost
            ));
        }

        violations
    }

    pub fn check(&self, input: &AuditInput) -> Result<()> {
        let violations = self.violations(input);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(violations.join("; ")))
        }
    }
}

fn check_range(violations: &mut Vec<String>, name: &str, value: f64, range: FieldRange) {
    if value.is_finite() && !range.contains(value) {
        violations.push(format!(
            "{name} must be within [{:.2}, {:.2}], got {value}",
            range.min, range.max
        ));
    }
}

/// One labelled input in a batch file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedScenario {
    pub name: String,
    #[serde(flatten)]
    pub input: AuditInput,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    scenario: Vec<NamedScenario>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonScenarios {
    List(Vec<NamedScenario>),
    Wrapped(ScenarioFile),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Json,
    Toml,
}

fn file_kind(path: &Path) -> Result<FileKind> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(FileKind::Json),
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(FileKind::Toml),
        _ => Err(Error::scenario(path, "expected a .json or .toml file")),
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::file_system("Failed to read scenario file", path, e))
}

/// Parse a batch of named scenarios from JSON or TOML text.
///
/// JSON may be a bare array or an object with a `scenario` array; TOML uses
/// `[[scenario]]` tables.
pub fn parse_scenarios(contents: &str, path: &Path) -> Result<Vec<NamedScenario>> {
    let scenarios = match file_kind(path)? {
        FileKind::Json => match serde_json::from_str::<JsonScenarios>(contents)
            .map_err(|e| Error::scenario(path, e.to_string()))?
        {
            JsonScenarios::List(list) => list,
            JsonScenarios::Wrapped(file) => file.scenario,
        },
        FileKind::Toml => {
            toml::from_str::<ScenarioFile>(contents)
                .map_err(|e| Error::scenario(path, e.to_string()))?
                .scenario
        }
    };

    if scenarios.is_empty() {
        return Err(Error::scenario(path, "no scenarios defined"));
    }
    Ok(scenarios)
}

pub fn load_scenarios(path: &Path) -> Result<Vec<NamedScenario>> {
    let contents = read_file(path)?;
    parse_scenarios(&contents, path)
}

/// Parse a single input record (all six fields at the top level).
pub fn parse_input(contents: &str, path: &Path) -> Result<AuditInput> {
    match file_kind(path)? {
        FileKind::Json => serde_json::from_str(contents).map_err(|e| Error::scenario(path, e.to_string())),
        FileKind::Toml => toml::from_str(contents).map_err(|e| Error::scenario(path, e.to_string())),
    }
}

pub fn load_input(path: &Path) -> Result<AuditInput> {
    let contents = read_file(path)?;
    parse_input(&contents, path)
}
