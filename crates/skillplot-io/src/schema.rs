//! Raw text tables as read from a source

use serde::{Deserialize, Serialize};

/// An untyped table: a header row plus text cells per row
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column names from the header row
    pub headers: Vec<String>,

    /// Row cells, in source order
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a new table
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get column index by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    /// Find the first column matching any of `names`
    ///
    /// Exact matches are tried first, in the order given, then a
    /// case-insensitive pass.
    pub fn find_column(&self, names: &[&str]) -> Option<usize> {
        names
            .iter()
            .find_map(|name| self.column_index(name))
            .or_else(|| {
                names.iter().find_map(|name| {
                    self.headers
                        .iter()
                        .position(|h| h.trim().eq_ignore_ascii_case(name))
                })
            })
    }

    /// Cell text at (`row`, `col`), if present
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }
}
