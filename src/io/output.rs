use super::chart::{render_bars, ChartGlyphs, CHART_LABELS};
use crate::batch::BatchReport;
use crate::core::{AuditOutcome, ReportSettings};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use clap::ValueEnum;
use comfy_table::{presets, ContentArrangement, Table};
use std::io::Write;

const CHART_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
    Markdown,
}

pub trait OutputWriter {
    fn write_outcome(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()>;
    fn write_batch(&mut self, report: &BatchReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_outcome(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(outcome)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_batch(&mut self, report: &BatchReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Rows of the headline metric block: label, value, detail.
fn metric_rows(outcome: &AuditOutcome, settings: &ReportSettings) -> Vec<[String; 3]> {
    let gap_row = if outcome.is_overloaded() {
        [
            "Target Gap (Overload)".to_string(),
            format!("+{}", settings.money(outcome.absolute_gap)),
            format!("+{:.1}%", outcome.relative_gap * 100.0),
        ]
    } else {
        [
            "Target Gap (Safe)".to_string(),
            settings.money(outcome.absolute_gap),
            "Achievable".to_string(),
        ]
    };

    vec![
        [
            "Market Trend (MC)".to_string(),
            format!("{:.3}", outcome.market_index),
            format!("{:+.1}%", outcome.market_change_percent()),
        ],
        [
            "Theoretical Target".to_string(),
            settings.money(outcome.theoretical_target),
            if outcome.floor_applied {
                format!("floored from {}", settings.money(outcome.raw_theoretical_target))
            } else {
                String::new()
            },
        ],
        gap_row,
        [
            "Est. Wasted Cost".to_string(),
            settings.money(outcome.wasted_cost),
            format!("Risk: {:.0}%", outcome.burnout_ratio * 100.0),
        ],
    ]
}

fn chart_rows(outcome: &AuditOutcome) -> [(&'static str, f64); 3] {
    [
        (CHART_LABELS[0], outcome.input.financials.prior_period_actual),
        (CHART_LABELS[1], outcome.theoretical_target),
        (CHART_LABELS[2], outcome.input.financials.stated_target),
    ]
}

/// Crash banner text. The floor sentence follows `floor_applied`, which is
/// checked separately from the crash flag.
fn crash_message(outcome: &AuditOutcome, settings: &ReportSettings) -> String {
    let headline = format!(
        "CRASH DETECTED: severe market contraction (market index {:.3}, {:+.1}%).",
        outcome.market_index,
        outcome.market_change_percent()
    );
    let prior = outcome.input.financials.prior_period_actual;
    if outcome.floor_applied && prior > 0.0 {
        format!(
            "{headline} The structural drop guard is active: the theoretical target is floored at {} ({:.0}% of the prior actual).",
            settings.money(outcome.theoretical_target),
            outcome.theoretical_target / prior * 100.0
        )
    } else {
        format!("{headline} The theoretical target stays above the structural floor.")
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    settings: ReportSettings,
    glyphs: ChartGlyphs,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig, settings: ReportSettings) -> Self {
        let glyphs = if formatting.emoji.should_use_emoji() {
            ChartGlyphs::UNICODE
        } else {
            ChartGlyphs::ASCII
        };
        Self {
            writer,
            formatter: formatter_for(formatting),
            settings,
            glyphs,
        }
    }

    fn is_ascii(&self) -> bool {
        self.glyphs == ChartGlyphs::ASCII
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.is_ascii() {
                presets::ASCII_FULL
            } else {
                presets::UTF8_FULL_CONDENSED
            })
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }

    fn section(&mut self, title: &str) -> anyhow::Result<()> {
        let rule = if self.is_ascii() { "-" } else { "─" };
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", self.formatter.header(title))?;
        writeln!(self.writer, "{}", rule.repeat(title.chars().count()))?;
        Ok(())
    }

    fn write_metrics(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        let mut table = self.new_table();
        table.set_header(vec!["Metric", "Value", "Detail"]);
        for row in metric_rows(outcome, &self.settings) {
            table.add_row(row.to_vec());
        }
        writeln!(self.writer, "{table}")?;

        if outcome.crash_triggered {
            let icon = self.formatter.emoji("⚠️ ", "[!] ");
            let message = crash_message(outcome, &self.settings);
            writeln!(self.writer, "{}", self.formatter.error(&format!("{icon}{message}")))?;
        }
        Ok(())
    }

    fn write_chart(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        self.section("Gap Analysis Chart")?;
        let rows = chart_rows(outcome);
        let bars = render_bars(
            &rows,
            outcome.input.financials.stated_target,
            CHART_WIDTH,
            self.glyphs,
        );
        for (line, (_, value)) in bars.iter().zip(rows.iter()) {
            writeln!(self.writer, "{}  {}", line, self.settings.money(*value))?;
        }
        writeln!(
            self.writer,
            "{}",
            self.formatter.dim(&format!(
                "{} marks the company target ({})",
                self.glyphs.marker,
                self.settings.money(outcome.input.financials.stated_target)
            ))
        )?;
        Ok(())
    }

    fn write_commentary(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        self.section("Strategic Risk Commentary")?;
        for paragraph in &outcome.narrative_paragraphs {
            writeln!(self.writer, "{paragraph}")?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_report(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        let report = &outcome.report;
        self.section("Audit Report")?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.tier(report.tier, &format!("Verdict: {}", report.headline))
        )?;
        writeln!(self.writer, "{}", self.formatter.bold(&report.status))?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", report.summary)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}:", report.section_title)?;
        for item in &report.items {
            writeln!(self.writer, "  - {item}")?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_outcome(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            self.formatter.header("Market-Based Target Feasibility Audit")
        )?;
        self.write_metrics(outcome)?;
        self.write_chart(outcome)?;
        self.write_commentary(outcome)?;
        self.write_report(outcome)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_batch(&mut self, report: &BatchReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("Batch Target Audit"))?;

        let mut table = self.new_table();
        table.set_header(batch_header());
        for entry in &report.scenarios {
            let mut row = batch_row(&entry.name, &entry.outcome, &self.settings);
            let tier = entry.outcome.tier;
            if let Some(cell) = row.last_mut() {
                *cell = self.formatter.tier(tier, cell);
            }
            table.add_row(row);
        }
        writeln!(self.writer, "{table}")?;

        let summary = &report.summary;
        writeln!(
            self.writer,
            "{} scenarios: {} feasible, {} yellow signal, {} structural failure, {} with crash guard",
            summary.total,
            summary.feasible,
            summary.yellow_signal,
            summary.structural_failure,
            summary.crash_count
        )?;
        writeln!(
            self.writer,
            "Total estimated wasted cost: {}",
            self.settings.money(summary.total_wasted_cost)
        )?;
        if let Some(worst) = &summary.worst_scenario {
            writeln!(self.writer, "Highest burnout risk: {worst}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn batch_header() -> Vec<&'static str> {
    vec![
        "Scenario",
        "Market Index",
        "Theoretical",
        "Stated",
        "Gap",
        "Burnout",
        "Wasted Cost",
        "Verdict",
    ]
}

fn batch_row(name: &str, outcome: &AuditOutcome, settings: &ReportSettings) -> Vec<String> {
    let crash = if outcome.crash_triggered { " (crash)" } else { "" };
    vec![
        name.to_string(),
        format!("{:.3}{crash}", outcome.market_index),
        settings.money(outcome.theoretical_target),
        settings.money(outcome.input.financials.stated_target),
        format!("{:+.1}%", outcome.relative_gap * 100.0),
        format!("{:.0}%", outcome.burnout_ratio * 100.0),
        settings.money(outcome.wasted_cost),
        outcome.report.headline.clone(),
    ]
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
    settings: ReportSettings,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, settings: ReportSettings) -> Self {
        Self { writer, settings }
    }

    fn write_header(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "# {title}")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Version: {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_table_row(&mut self, cells: &[String]) -> anyhow::Result<()> {
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_outcome(&mut self, outcome: &AuditOutcome) -> anyhow::Result<()> {
        self.write_header("Target Audit Report")?;

        writeln!(self.writer, "## Key Metrics")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value | Detail |")?;
        writeln!(self.writer, "|--------|-------|--------|")?;
        for row in metric_rows(outcome, &self.settings) {
            self.write_table_row(&row)?;
        }
        writeln!(self.writer)?;
        if outcome.crash_triggered {
            writeln!(self.writer, "> **Warning:** {}", crash_message(outcome, &self.settings))?;
            writeln!(self.writer)?;
        }

        writeln!(self.writer, "## Gap Analysis")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Category | Value |")?;
        writeln!(self.writer, "|----------|-------|")?;
        for (label, value) in chart_rows(outcome) {
            let cells = [label.to_string(), self.settings.money(value)];
            self.write_table_row(&cells)?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "## Strategic Risk Commentary")?;
        writeln!(self.writer)?;
        for paragraph in &outcome.narrative_paragraphs {
            writeln!(self.writer, "{paragraph}")?;
            writeln!(self.writer)?;
        }

        let report = &outcome.report;
        writeln!(self.writer, "## Audit Report: {}", report.headline)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**{}**", report.status)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", report.summary)?;
        writeln!(self.writer)?;
        writeln!(self.writer, "**{}:**", report.section_title)?;
        for item in &report.items {
            writeln!(self.writer, "* {item}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_batch(&mut self, report: &BatchReport) -> anyhow::Result<()> {
        self.write_header("Batch Target Audit")?;

        let header: Vec<String> = batch_header().into_iter().map(String::from).collect();
        self.write_table_row(&header)?;
        writeln!(self.writer, "|{}", "---|".repeat(header.len()))?;
        for entry in &report.scenarios {
            let row = batch_row(&entry.name, &entry.outcome, &self.settings);
            self.write_table_row(&row)?;
        }
        writeln!(self.writer)?;

        let summary = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "- Scenarios: {}", summary.total)?;
        writeln!(self.writer, "- Feasible: {}", summary.feasible)?;
        writeln!(self.writer, "- Yellow signal: {}", summary.yellow_signal)?;
        writeln!(self.writer, "- Structural failure: {}", summary.structural_failure)?;
        writeln!(self.writer, "- Crash guard active: {}", summary.crash_count)?;
        writeln!(
            self.writer,
            "- Total estimated wasted cost: {}",
            self.settings.money(summary.total_wasted_cost)
        )?;
        if let Some(worst) = &summary.worst_scenario {
            writeln!(self.writer, "- Highest burnout risk: {worst}")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a>(
    format: OutputFormat,
    writer: Box<dyn Write + 'a>,
    formatting: FormattingConfig,
    settings: ReportSettings,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer, settings)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting, settings)),
    }
}
