//! Tabular rendering of a report.
//!
//! A [`Table`] is a list of [`Column`] headers and rows of [`Cell`].
//! It is rendered into text by a [`TableFormat`]:
//!
//! * [`Console`] for a fixed-width layout meant for a terminal;
//! * [`Latex`] for a booktabs `tabular` to include in a document.
//!
//! ```
//! # use flowmon_core::table::*;
//! let mut table = Table::new([
//!     Column::new("Flow ID", Alignment::Left),
//!     Column::new("Lost Packets", Alignment::Right),
//! ]);
//! table.push_row(vec![Cell::from("1"), Cell::Signed(10)]);
//!
//! assert_eq!(
//!     Console::default().render(&table),
//!     "Flow ID  Lost Packets\n\
//!      ---------------------\n\
//!      1                  10\n"
//! );
//! ```

mod console;
mod latex;

pub use self::{console::Console, latex::Latex};

/// A text rendering of a [`Table`].
pub trait TableFormat {
    fn render(&self, table: &Table) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    alignment: Alignment,
}

impl Column {
    pub fn new(name: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            name: name.into(),
            alignment,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// A single value of a [`Table`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    /// a value absent from this row
    #[default]
    Empty,
}

impl Cell {
    /// format the value of the cell
    ///
    /// Integers are written as decimal digits and floats with
    /// `float_precision` decimals. [`Cell::Empty`] is the empty string.
    pub fn format(&self, float_precision: usize) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Unsigned(value) => value.to_string(),
            Self::Signed(value) => value.to_string(),
            Self::Float(value) => format!("{value:.float_precision$}"),
            Self::Empty => String::new(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: impl IntoIterator<Item = Column>) -> Self {
        Self {
            columns: columns.into_iter().collect(),
            rows: Vec::new(),
        }
    }

    /// append a row to the table
    ///
    /// The row is padded with [`Cell::Empty`] (or truncated) to the
    /// number of columns.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Empty);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
