//! Minimal box-drawn table renderer.
//!
//! Cells never wrap: each column is as wide as its widest cell, measured in
//! terminal display columns.

use colored::{Color, Colorize};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub justify: Justify,
    pub color: Option<Color>,
}

impl Column {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            justify: Justify::Left,
            color: None,
        }
    }

    pub fn justify(mut self, justify: Justify) -> Self {
        self.justify = justify;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Append a row. Missing trailing cells render empty; extra cells are dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .map(|row| row.get(i).map_or(0, |cell| cell.width()))
                    .chain(std::iter::once(col.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Render the table. With `styled`, headers are bold, the title italic,
    /// and cells take their column colour.
    pub fn render(&self, styled: bool) -> String {
        let widths = self.widths();
        // Each column is padded by one space on both sides, plus borders.
        let total: usize = widths.iter().map(|w| w + 3).sum::<usize>() + 1;
        let mut lines = Vec::new();

        if let Some(title) = &self.title {
            let centered = pad(title, total, Justify::Center);
            let centered = centered.trim_end().to_string();
            lines.push(if styled {
                centered.italic().to_string()
            } else {
                centered
            });
        }

        lines.push(rule(&widths, ('┏', '━', '┳', '┓')));
        let header_cells = self.columns.iter().zip(&widths).map(|(col, width)| {
            let text = pad(&col.header, *width, col.justify);
            if styled { text.bold().to_string() } else { text }
        });
        lines.push(join_cells(header_cells, '┃'));
        lines.push(rule(&widths, ('┡', '━', '╇', '┩')));

        for row in &self.rows {
            // Rows added before a column was appended render that cell empty.
            let cells = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (col, width))| {
                    let cell = row.get(i).map_or("", String::as_str);
                    let text = pad(cell, *width, col.justify);
                    match (styled, col.color) {
                        (true, Some(color)) => text.color(color).to_string(),
                        _ => text,
                    }
                });
            lines.push(join_cells(cells, '│'));
        }

        lines.push(rule(&widths, ('└', '─', '┴', '┘')));
        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn pad(text: &str, width: usize, justify: Justify) -> String {
    let gap = width.saturating_sub(text.width());
    match justify {
        Justify::Left => format!("{text}{}", " ".repeat(gap)),
        Justify::Right => format!("{}{text}", " ".repeat(gap)),
        Justify::Center => {
            let left = gap / 2;
            format!("{}{text}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

fn rule(widths: &[usize], (left, fill, mid, right): (char, char, char, char)) -> String {
    let segments: Vec<String> = widths
        .iter()
        .map(|w| fill.to_string().repeat(w + 2))
        .collect();
    format!("{left}{}{right}", segments.join(&mid.to_string()))
}

fn join_cells<I: Iterator<Item = String>>(cells: I, border: char) -> String {
    let inner: Vec<String> = cells.map(|cell| format!(" {cell} ")).collect();
    format!("{border}{}{border}", inner.join(&border.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_column() -> Table {
        let mut table = Table::new("T");
        table.add_column(Column::new("Name").justify(Justify::Right));
        table.add_column(Column::new("Age"));
        table.add_row(["Al", "7"]);
        table.add_row(["Charlie", "22"]);
        table
    }

    #[test]
    fn renders_plain_layout() {
        let expected = [
            "        T",
            "┏━━━━━━━━━┳━━━━━┓",
            "┃    Name ┃ Age ┃",
            "┡━━━━━━━━━╇━━━━━┩",
            "│      Al │ 7   │",
            "│ Charlie │ 22  │",
            "└─────────┴─────┘",
            "",
        ]
        .join("\n");
        assert_eq!(two_column().render(false), expected);
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = two_column();
        table.add_row(["Bo"]);
        assert_eq!(table.rows[2], vec!["Bo".to_string(), String::new()]);
    }

    #[test]
    fn column_added_after_rows_renders_empty_cells() {
        let mut table = two_column();
        table.add_column(Column::new("City"));
        let rendered = table.render(false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[2], "┃    Name ┃ Age ┃ City ┃");
        assert_eq!(lines[4], "│      Al │ 7   │      │");
    }

    #[test]
    fn width_counts_display_columns() {
        let mut table = Table::default();
        table.add_column(Column::new("City"));
        table.add_row(["東京"]);
        let rendered = table.render(false);
        assert!(rendered.contains("│ 東京 │"), "{rendered}");
    }

    #[test]
    fn center_splits_odd_gap_to_the_right() {
        assert_eq!(pad("ab", 5, Justify::Center), " ab  ");
    }
}
