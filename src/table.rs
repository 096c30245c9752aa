use std::fmt;

use crate::{
    error::{BioAgeError, Result},
    utils::{first_duplicate, select_indices},
};

/// A single table entry
///
/// Numeric cells and free text (strain, treatment, accession) share one
/// representation so that metadata survives every transformation. Absent
/// values are explicit rather than coerced to zero.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}
impl Cell {
    /// Interprets a raw delimited field
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("nan")
        {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) => Cell::Number(value),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}
impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}
impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Missing, Cell::Number)
    }
}
impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Text(text) => write!(f, "{}", text),
            Cell::Missing => Ok(()),
        }
    }
}

/// An immutable, row-indexed table
///
/// Column names are unique and every row holds exactly one cell per column.
/// Transformations return a new table and leave the receiver untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index_name: String,
    index: Vec<String>,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}
impl Table {
    pub fn new(
        index_name: impl Into<String>,
        index: Vec<String>,
        columns: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        if let Some(name) = first_duplicate(&columns) {
            return Err(BioAgeError::DuplicateColumn(name.clone()));
        }
        if index.len() != rows.len() {
            return Err(BioAgeError::LengthMismatch {
                expected: index.len(),
                found: rows.len(),
            });
        }
        for (id, row) in index.iter().zip(rows.iter()) {
            if row.len() != columns.len() {
                return Err(BioAgeError::RaggedRow {
                    row: id.clone(),
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            index_name: index_name.into(),
            index,
            columns,
            rows,
        })
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_position(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| BioAgeError::MissingColumn(name.to_string()))
    }

    /// # Panics
    ///
    /// Panics if `row` or `column` is out of range.
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.rows[row][column]
    }

    /// Reads a numeric column, failing on any text cell
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let position = self.column_position(name)?;
        (0..self.n_rows())
            .map(|row| self.numeric_cell(row, position))
            .collect()
    }

    /// Reads the given columns of one row as numbers, failing on any text cell
    pub fn numeric_row(&self, row: usize, columns: &[usize]) -> Result<Vec<Option<f64>>> {
        columns
            .iter()
            .map(|&column| self.numeric_cell(row, column))
            .collect()
    }

    fn numeric_cell(&self, row: usize, column: usize) -> Result<Option<f64>> {
        match &self.rows[row][column] {
            Cell::Number(value) => Ok(Some(*value)),
            Cell::Missing => Ok(None),
            Cell::Text(value) => Err(BioAgeError::NonNumeric {
                row: self.index[row].clone(),
                column: self.columns[column].clone(),
                value: value.clone(),
            }),
        }
    }

    /// Returns a copy with `values` as the column `name`
    ///
    /// An existing column of the same name is replaced in place, otherwise
    /// the column is appended.
    pub fn with_column(&self, name: &str, values: Vec<Cell>) -> Result<Table> {
        if values.len() != self.n_rows() {
            return Err(BioAgeError::LengthMismatch {
                expected: self.n_rows(),
                found: values.len(),
            });
        }
        let mut columns = self.columns.clone();
        let mut rows = self.rows.clone();
        match self.columns.iter().position(|c| c == name) {
            Some(position) => {
                for (row, value) in rows.iter_mut().zip(values) {
                    row[position] = value;
                }
            }
            None => {
                columns.push(name.to_string());
                for (row, value) in rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(Table {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            columns,
            rows,
        })
    }

    /// Returns a copy with `values` appended as the last column `name`
    ///
    /// Unlike [`Table::with_column`] an existing column of the same name is
    /// a `DuplicateColumn` error.
    pub fn append_column(&self, name: &str, values: Vec<Cell>) -> Result<Table> {
        if self.columns.iter().any(|c| c == name) {
            return Err(BioAgeError::DuplicateColumn(name.to_string()));
        }
        self.with_column(name, values)
    }

    /// Returns a copy restricted to the columns at `positions`, in that order
    pub fn select_positions(&self, positions: &[usize]) -> Table {
        Table {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            columns: select_indices(positions, &self.columns),
            rows: self
                .rows
                .iter()
                .map(|row| select_indices(positions, row))
                .collect(),
        }
    }

    /// Returns a copy restricted to the named columns, in the given order
    pub fn select_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let positions = names
            .iter()
            .map(|name| self.column_position(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.select_positions(&positions))
    }

    /// Swaps rows and columns
    ///
    /// The row identifiers become column names and must therefore be unique.
    pub fn transpose(&self, index_name: impl Into<String>) -> Result<Table> {
        let rows = (0..self.n_cols())
            .map(|column| self.rows.iter().map(|row| row[column].clone()).collect())
            .collect();
        Table::new(index_name, self.columns.clone(), self.index.clone(), rows)
    }
}
