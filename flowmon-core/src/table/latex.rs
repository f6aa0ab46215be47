use super::{Alignment, Cell, Table, TableFormat};
use crate::defaults::FLOAT_PRECISION;

/// Rendering of a [`Table`] as a LaTeX `tabular` environment.
///
/// Uses the `booktabs` rules (`\toprule`, `\midrule`, `\bottomrule`).
/// Left aligned columns are declared `l` and right aligned columns `r`.
/// Text is escaped so the file can be `\input` as is.
///
/// ```
/// # use flowmon_core::table::*;
/// let mut table = Table::new([
///     Column::new("Flow ID", Alignment::Left),
///     Column::new("RTT (ms)", Alignment::Right),
/// ]);
/// table.push_row(vec![Cell::from("1"), Cell::Float(0.01)]);
///
/// assert_eq!(
///     Latex::default().render(&table),
///     "\\begin{tabular}{lr}\n\
///      \\toprule\n\
///      Flow ID & RTT (ms) \\\\\n\
///      \\midrule\n\
///      1 & 0.010000 \\\\\n\
///      \\bottomrule\n\
///      \\end{tabular}\n"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latex {
    pub float_precision: usize,
}

impl Default for Latex {
    fn default() -> Self {
        Self {
            float_precision: FLOAT_PRECISION,
        }
    }
}

impl TableFormat for Latex {
    fn render(&self, table: &Table) -> String {
        let spec: String = table
            .columns()
            .iter()
            .map(|column| match column.alignment() {
                Alignment::Left => 'l',
                Alignment::Right => 'r',
            })
            .collect();

        let mut out = String::new();
        out.push_str(&format!("\\begin{{tabular}}{{{spec}}}\n"));
        out.push_str("\\toprule\n");
        let header: Vec<String> = table
            .columns()
            .iter()
            .map(|column| escape(column.name()))
            .collect();
        out.push_str(&row(&header));
        out.push_str("\\midrule\n");
        for cells in table.rows() {
            let cells: Vec<String> = cells.iter().map(|cell| self.cell(cell)).collect();
            out.push_str(&row(&cells));
        }
        out.push_str("\\bottomrule\n");
        out.push_str("\\end{tabular}\n");

        out
    }
}

impl Latex {
    fn cell(&self, cell: &Cell) -> String {
        match cell {
            Cell::Text(text) => escape(text),
            cell => cell.format(self.float_precision),
        }
    }
}

fn row(cells: &[String]) -> String {
    format!("{} \\\\\n", cells.join(" & "))
}

/// escape the characters with a special meaning in LaTeX
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}
