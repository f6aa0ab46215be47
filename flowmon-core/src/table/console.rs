use super::{Alignment, Column, Table, TableFormat};
use crate::defaults::FLOAT_PRECISION;

const SEPARATOR: &str = "  ";

/// Fixed-width rendering of a [`Table`] for a terminal.
///
/// Every column is as wide as its widest value (header included) and
/// columns are separated by two spaces. The header is underlined with
/// dashes. Lines carry no trailing whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Console {
    pub float_precision: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            float_precision: FLOAT_PRECISION,
        }
    }
}

impl TableFormat for Console {
    fn render(&self, table: &Table) -> String {
        let columns = table.columns();
        let header: Vec<String> = columns.iter().map(|column| column.name().to_owned()).collect();
        let body: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.format(self.float_precision)).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|name| name.chars().count()).collect();
        for row in &body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&line(columns, &widths, &header));
        let rule = widths.iter().sum::<usize>() + SEPARATOR.len() * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(rule));
        out.push('\n');
        for row in &body {
            out.push_str(&line(columns, &widths, row));
        }

        out
    }
}

fn line(columns: &[Column], widths: &[usize], cells: &[String]) -> String {
    let padded: Vec<String> = columns
        .iter()
        .zip(widths)
        .zip(cells)
        .map(|((column, &width), cell)| match column.alignment() {
            Alignment::Left => format!("{cell:<width$}"),
            Alignment::Right => format!("{cell:>width$}"),
        })
        .collect();

    let mut line = padded.join(SEPARATOR).trim_end().to_owned();
    line.push('\n');
    line
}
