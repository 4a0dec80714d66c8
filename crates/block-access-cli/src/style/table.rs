//! Table formatting using comfy-table.

use block_access::RuleSet;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(text: &str) -> Cell {
    if super::no_color() {
        Cell::new(text)
    } else {
        Cell::new(text).add_attribute(Attribute::Bold).fg(Color::Cyan)
    }
}

/// One row per rule: index, days, window and excluded roles.
pub fn rule_table(rules: &RuleSet) -> Table {
    let mut table = new_table();
    table.set_header(
        ["#", "Days", "Window", "Excluded roles"]
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );

    for (index, rule) in rules.iter().enumerate() {
        let days: Vec<&str> = rule.days.iter().map(|d| d.abbrev()).collect();
        let window = format!("{}-{}", rule.start, rule.end);
        let excluded = if rule.excluded_principals.is_empty() {
            "-".to_string()
        } else {
            rule.excluded_principals.join(", ")
        };
        table.add_row(vec![index.to_string(), days.join(","), window, excluded]);
    }

    table
}

/// Creates a key-value info table (two columns: key and value).
pub fn info_table(entries: &[(&str, &str)]) -> Table {
    let mut table = new_table();

    for (key, value) in entries {
        let key_cell = if super::no_color() {
            Cell::new(key)
        } else {
            Cell::new(key).fg(Color::DarkGrey)
        };
        table.add_row(vec![key_cell, Cell::new(value)]);
    }

    table
}
