//! Table formatting utilities for CLI output.

use std::collections::BTreeMap;

use comfy_table::{presets, ContentArrangement, Table};
use swse::Value;

/// One reduced attribute of a sheet.
pub struct AttributeRow {
    /// Attribute key (e.g., "damage").
    pub key: String,
    /// Number of contributions.
    pub contributions: usize,
    /// Labels of the contributing sources.
    pub sources: Vec<String>,
    /// The reduced value.
    pub result: Value,
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Format reduced attributes as an ASCII table.
pub fn format_attribute_table(rows: &[AttributeRow]) -> Table {
    let mut table = new_table(vec!["Attribute", "Contributions", "Sources", "Result"]);
    for row in rows {
        table.add_row(vec![
            row.key.clone(),
            row.contributions.to_string(),
            row.sources.join(", "),
            row.result.to_string(),
        ]);
    }
    table
}

/// Format sheet variables as an ASCII table.
pub fn format_variable_table(variables: &BTreeMap<String, Value>) -> Table {
    let mut table = new_table(vec!["Variable", "Value"]);
    for (name, value) in variables {
        table.add_row(vec![name.clone(), value.to_string()]);
    }
    table
}

/// Format name tables as a two-column ASCII table.
pub fn format_name_table(header: [&str; 2], rows: &[(String, String)]) -> Table {
    let mut table = new_table(header.to_vec());
    for (name, detail) in rows {
        table.add_row(vec![name.clone(), detail.clone()]);
    }
    table
}
