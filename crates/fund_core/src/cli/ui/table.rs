use growfund_core::ReportTable;

use crate::cli::{output, ui::style::UiStyle};

/// Declarative description of a table column.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub width: usize,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, width: usize) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// Simple table model used for rendering read-only overviews.
#[derive(Debug, Clone)]
pub struct Table {
    pub title: Option<String>,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a renderable table from a report, sizing each column to
    /// its widest cell.
    pub fn from_report(report: &ReportTable) -> Self {
        let mut widths: Vec<usize> = report.headers.iter().map(|h| h.len()).collect();
        for row in &report.rows {
            for (idx, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(idx) {
                    *width = (*width).max(cell.len());
                }
            }
        }
        let columns = report
            .headers
            .iter()
            .zip(widths)
            .map(|(header, width)| TableColumn::new(header.clone(), width))
            .collect();
        Self {
            title: Some(report.title.clone()),
            columns,
            rows: report.rows.clone(),
        }
    }
}

/// Renders [`Table`] instances using simple padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn render(table: &Table, style: &UiStyle) {
        if let Some(title) = &table.title {
            let header = format!("{}{}", style.header_prefix, title);
            output::plain(style.apply_header_style(&header));
        }

        if !table.columns.is_empty() {
            let total_width = table
                .columns
                .iter()
                .map(|col| col.width + 1)
                .sum::<usize>()
                .max(1);
            output::plain(style.horizontal_line(total_width));

            let header = table
                .columns
                .iter()
                .map(|col| format!("{:width$} ", col.header, width = col.width))
                .collect::<String>();
            output::plain(style.apply_header_style(header.trim_end()));
            output::plain(style.horizontal_line(total_width));
        }

        for row in &table.rows {
            let mut line = String::new();
            for (idx, column) in table.columns.iter().enumerate() {
                if idx > 0 {
                    line.push(' ');
                }
                let cell = row.get(idx).map(String::as_str).unwrap_or("");
                line.push_str(&format!("{:width$}", cell, width = column.width));
            }
            output::plain(line.trim_end());
        }
    }
}
