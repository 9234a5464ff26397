//! Demo command-line app: a styled greeting and a sample table.

pub mod table;

use colored::{Color, Colorize};

use crate::table::{Column, Justify, Table};

/// `Hello, <name>!` with the name in bold magenta.
pub fn greeting(name: &str) -> String {
    format!("Hello, {}!", name.bold().magenta())
}

/// The fixed three-row sample table.
pub fn sample_table() -> Table {
    let mut table = Table::new("Sample Table");
    table.add_column(
        Column::new("Name")
            .justify(Justify::Right)
            .color(Color::Cyan),
    );
    table.add_column(Column::new("Age").color(Color::Magenta));
    table.add_column(Column::new("City").color(Color::Green));

    table.add_row(["Alice", "24", "New York"]);
    table.add_row(["Bob", "30", "San Francisco"]);
    table.add_row(["Charlie", "22", "Los Angeles"]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_contains_name() {
        let text = greeting("Ada");
        assert!(text.starts_with("Hello, "));
        assert!(text.contains("Ada"));
        assert!(text.ends_with('!'));
    }

    #[test]
    fn sample_table_plain_rendering() {
        let rendered = sample_table().render(false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0].trim(), "Sample Table");
        assert_eq!(lines[2], "┃    Name ┃ Age ┃ City          ┃");
        assert_eq!(lines[4], "│   Alice │ 24  │ New York      │");
        assert_eq!(lines[5], "│     Bob │ 30  │ San Francisco │");
        assert_eq!(lines[6], "│ Charlie │ 22  │ Los Angeles   │");
        assert_eq!(lines.len(), 8);
    }
}
