//! Core table types for representing listing exports
//!
//! A [`Table`] is a plain ordered list of named columns. Every column holds
//! the same number of cells; row `i` is the `i`-th cell of each column.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Largest magnitude rendered as an integer without a fractional part
pub(crate) const MAX_INTEGRAL: f64 = 1e15;

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appeared in the header
    pub name: String,
    /// Cell values, one per row
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Build a text column, mapping empty strings to [`CellValue::Missing`]
    pub fn from_texts<S: AsRef<str>>(name: impl Into<String>, values: &[S]) -> Self {
        Self::new(
            name,
            values.iter().map(|v| CellValue::from_text(v.as_ref())).collect(),
        )
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the column has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Every cell coerced with [`CellValue::to_trimmed_string`]
    pub fn trimmed_strings(&self) -> Vec<String> {
        self.values.iter().map(CellValue::to_trimmed_string).collect()
    }
}

/// An in-memory table: ordered named columns of equal length
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Columns in source order
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking that all have the same length
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Append a column; its length must match the existing rows
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(Error::ColumnLength {
                    column: column.name,
                    expected: first.len(),
                    found: column.values.len(),
                });
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Find a column by its exact name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column by position
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&CellValue>> {
        if index >= self.row_count() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// A copy of the first `n` rows
    pub fn head(&self, n: usize) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.values.iter().take(n).cloned().collect()))
            .collect();
        Table { columns }
    }
}

/// A cell value as read from a spreadsheet or CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Empty/null cell
    Missing,
    /// String value
    Text(String),
    /// Numeric value
    Number(f64),
    /// Any other value (boolean, date, ...), kept as its display text
    Other(String),
}

impl CellValue {
    /// Wrap raw text; an empty string becomes [`CellValue::Missing`]
    ///
    /// No numeric detection happens here, so "0123" stays text.
    pub fn from_text(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Missing
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// Check if the cell is missing
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Coerce any cell to its string form with surrounding whitespace removed
    ///
    /// Missing cells and NaN become `""`. Integral numbers drop the fractional
    /// part so a numeric barcode `8690000000001.0` renders as `8690000000001`.
    pub fn to_trimmed_string(&self) -> String {
        match self {
            CellValue::Missing => String::new(),
            CellValue::Text(s) | CellValue::Other(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        String::new()
    } else if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_INTEGRAL {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Missing => write!(f, ""),
            CellValue::Text(s) | CellValue::Other(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_string_text() {
        assert_eq!(CellValue::Text("  ABC ".to_string()).to_trimmed_string(), "ABC");
        assert_eq!(CellValue::Other(" true".to_string()).to_trimmed_string(), "true");
        assert_eq!(CellValue::Missing.to_trimmed_string(), "");
    }

    #[test]
    fn test_trimmed_string_numbers() {
        assert_eq!(CellValue::Number(111.0).to_trimmed_string(), "111");
        assert_eq!(CellValue::Number(8690000000001.0).to_trimmed_string(), "8690000000001");
        assert_eq!(CellValue::Number(-2.5).to_trimmed_string(), "-2.5");
        assert_eq!(CellValue::Number(0.0).to_trimmed_string(), "0");
        assert_eq!(CellValue::Number(f64::NAN).to_trimmed_string(), "");
    }

    #[test]
    fn test_from_text_keeps_leading_zeros() {
        assert_eq!(CellValue::from_text("0123"), CellValue::Text("0123".to_string()));
        assert_eq!(CellValue::from_text(""), CellValue::Missing);
    }

    #[test]
    fn test_is_missing() {
        assert!(CellValue::Missing.is_missing());
        assert!(CellValue::Number(f64::NAN).is_missing());
        assert!(!CellValue::Text(String::new()).is_missing());
        assert!(!CellValue::Number(0.0).is_missing());
    }

    #[test]
    fn test_display_keeps_whitespace() {
        assert_eq!(CellValue::Text(" X ".to_string()).to_string(), " X ");
        assert_eq!(CellValue::Number(111.0).to_string(), "111");
        assert_eq!(CellValue::Number(f64::NAN).to_string(), "");
        assert_eq!(CellValue::Missing.to_string(), "");
    }

    #[test]
    fn test_push_column_length_mismatch() {
        let mut table = Table::new();
        table.push_column(Column::from_texts("a", &["1", "2"])).unwrap();

        let err = table.push_column(Column::from_texts("b", &["1"])).unwrap_err();
        assert!(matches!(
            err,
            Error::ColumnLength { expected: 2, found: 1, .. }
        ));
        assert_eq!(table.column_count(), 1);
    }

    #[test]
    fn test_row_access_and_head() {
        let table = Table::from_columns(vec![
            Column::from_texts("a", &["1", "2", "3"]),
            Column::from_texts("b", &["x", "", "z"]),
        ])
        .unwrap();

        assert_eq!(table.row_count(), 3);
        let row = table.row(1).unwrap();
        assert_eq!(row[0], &CellValue::Text("2".to_string()));
        assert_eq!(row[1], &CellValue::Missing);
        assert!(table.row(3).is_none());

        let head = table.head(2);
        assert_eq!(head.row_count(), 2);
        assert_eq!(head.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_table_has_no_rows() {
        let table = Table::new();
        assert_eq!(table.row_count(), 0);
        assert!(table.row(0).is_none());
    }
}
