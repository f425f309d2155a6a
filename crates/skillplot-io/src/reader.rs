//! Table source trait and common types
//!
//! The `TableSource` trait provides a uniform interface for reading the
//! rating table from the supported text formats.

use crate::record::RatingTable;
use crate::schema::RawTable;
use thiserror::Error;

/// Errors that can occur while loading a rating table
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// Trait for reading a text table from some format
pub trait TableSource: Send + Sync {
    /// Read every row as text cells
    fn read_table(&self) -> IoResult<RawTable>;

    /// Get the file path (if applicable)
    fn path(&self) -> Option<&str> {
        None
    }

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed source for dynamic dispatch
pub type BoxedSource = Box<dyn TableSource>;

/// Open a file and return an appropriate source
///
/// The format is auto-detected from the file extension.
pub fn open_file(path: &str) -> IoResult<BoxedSource> {
    let extension = path
        .rsplit('.')
        .next()
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" | "txt" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open(path)?))
        }

        #[cfg(feature = "csv")]
        "tsv" => {
            use crate::csv_reader::CsvReader;
            Ok(Box::new(CsvReader::open_with_options(path, b'\t')?))
        }

        _ => Err(IoError::InvalidFormat(format!(
            "Unknown file extension: {} (supported: {})",
            extension,
            supported_extensions().join(", ")
        ))),
    }
}

/// Open `path`, read it, and convert it into rating records
pub fn load_ratings(path: &str) -> IoResult<RatingTable> {
    let source = open_file(path)?;
    let raw = source.read_table()?;
    let table = RatingTable::from_raw(&raw)?;
    tracing::info!(
        "Loaded {} rating records from {} ({})",
        table.len(),
        path,
        source.format_name()
    );
    Ok(table)
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
        extensions.push("txt");
    }

    extensions
}
