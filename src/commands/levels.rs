use crate::input::CompetitionLevel;
use clap::ValueEnum;
use comfy_table::{presets, Table};

/// The name accepted by `--competition`.
fn flag_name(level: CompetitionLevel) -> String {
    level
        .to_possible_value()
        .map(|value| value.get_name().to_string())
        .unwrap_or_default()
}

/// Table of the five competitive levels with their coefficients.
pub fn levels_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_header(vec!["--competition", "Coefficient", "Meaning"]);
    for level in CompetitionLevel::ALL {
        table.add_row(vec![
            flag_name(level),
            format!("{:.2}", level.factor()),
            level.description().to_string(),
        ]);
    }
    table
}

pub fn list_levels() {
    println!("{}", levels_table());
}
