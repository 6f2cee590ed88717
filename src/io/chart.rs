//! Text rendering of the three-bar gap chart.
//!
//! Bars are scaled against the largest value; a marker column shows where the
//! stated target sits on every row.

pub const CHART_LABELS: [&str; 3] = ["Actual (t-1)", "Market Logic Target", "Company Target"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGlyphs {
    pub bar: char,
    pub empty: char,
    /// Reference marker drawn outside a bar
    pub marker: char,
    /// Reference marker drawn inside a bar
    pub marker_on_bar: char,
}

impl ChartGlyphs {
    pub const UNICODE: ChartGlyphs = ChartGlyphs {
        bar: '█',
        empty: ' ',
        marker: '┆',
        marker_on_bar: '┃',
    };

    pub const ASCII: ChartGlyphs = ChartGlyphs {
        bar: '#',
        empty: ' ',
        marker: '|',
        marker_on_bar: '|',
    };
}

fn scale(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round().min(width as f64) as usize
}

/// Render `(label, value)` rows as horizontal bars with a reference marker.
///
/// Returns one line per row without trailing values; callers append their
/// own formatted amounts.
pub fn render_bars(rows: &[(&str, f64)], reference: f64, width: usize, glyphs: ChartGlyphs) -> Vec<String> {
    let max = rows
        .iter()
        .map(|(_, value)| *value)
        .chain(std::iter::once(reference))
        .filter(|value| value.is_finite())
        .fold(0.0_f64, f64::max);
    let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    let marker_col = scale(reference, max, width);

    rows.iter()
        .map(|(label, value)| {
            let filled = scale(*value, max, width);
            let cells: String = (0..=width)
                .map(|col| {
                    let in_bar = col < filled;
                    match (col == marker_col && reference > 0.0, in_bar) {
                        (true, true) => glyphs.marker_on_bar,
                        (true, false) => glyphs.marker,
                        (false, true) => glyphs.bar,
                        (false, false) => glyphs.empty,
                    }
                })
                .collect();
            format!("{:<label_width$}  {}", label, cells)
        })
        .collect()
}
