//! Table rendering for pretty and table modes

use colored::Colorize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Shown instead of an empty table
pub const NO_RESULTS: &str = "No results found.";

/// Render rows as a rounded table with centred headers.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

/// A browse row: bold heading with the title count, then the table.
pub fn format_section<T: Tabled>(heading: &str, rows: &[T]) -> String {
    let count = match rows.len() {
        1 => "1 title".to_string(),
        n => format!("{} titles", n),
    };
    format!("{} {}\n{}", heading.bold(), count.dimmed(), format_table(rows))
}
