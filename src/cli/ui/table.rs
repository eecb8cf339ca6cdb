use colored::Colorize;

use crate::cli::{io, output::current_preferences};

/// Describes how a column should align its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub alignment: Alignment,
    pub max_width: Option<usize>,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            alignment: Alignment::Left,
            max_width: None,
        }
    }

    /// Right-aligned column, used for amounts and percentages.
    pub fn right(header: impl Into<String>) -> Self {
        Self {
            alignment: Alignment::Right,
            ..Self::left(header)
        }
    }

    pub fn truncate_at(mut self, max_width: usize) -> Self {
        self.max_width = Some(max_width.max(1));
        self
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Option<Vec<String>>,
}

impl Table {
    pub fn new<T: Into<String>>(title: Option<T>, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.map(|value| value.into()),
            columns,
            rows: Vec::new(),
            footer: None,
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    /// Summary row rendered under a rule after the body.
    pub fn set_footer<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.footer = Some(cells.into_iter().map(|value| value.into()).collect());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let body = self
                    .rows
                    .iter()
                    .chain(self.footer.iter())
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0);
                let width = body.max(column.header.chars().count());
                column.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = fit(cells.get(idx).map(String::as_str).unwrap_or(""), *width);
                match column.alignment {
                    Alignment::Left => format!("{text:<width$}"),
                    Alignment::Right => format!("{text:>width$}"),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    }

    /// Renders the table body as plain text lines (title excluded).
    pub fn render_lines(&self) -> Vec<String> {
        let widths = self.widths();
        let rule_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        let rule = "-".repeat(rule_width);
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut lines = vec![self.render_row(&headers, &widths), rule.clone()];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        if let Some(footer) = &self.footer {
            lines.push(rule);
            lines.push(self.render_row(footer, &widths));
        }
        lines
    }
}

fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut kept: String = text.chars().take(width.saturating_sub(1)).collect();
    kept.push('~');
    kept
}

/// Prints [`Table`] instances using padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table) {
        let color = current_preferences().color_enabled;
        if let Some(title) = &table.title {
            let title = if color {
                title.bold().to_string()
            } else {
                title.clone()
            };
            io::print_info(title);
        }
        for (idx, line) in table.render_lines().into_iter().enumerate() {
            if idx == 0 && color {
                io::print_info(line.bold());
            } else {
                io::print_info(line);
            }
        }
    }
}
