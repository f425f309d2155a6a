//! CSV file reader

use crate::reader::{IoError, IoResult, TableSource};
use crate::schema::RawTable;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV file reader
pub struct CsvReader {
    path: String,
    delimiter: u8,
}

impl CsvReader {
    /// Open a comma separated file
    pub fn open(path: &str) -> IoResult<Self> {
        Self::open_with_options(path, b',')
    }

    /// Open a file with a custom delimiter
    pub fn open_with_options(path: &str, delimiter: u8) -> IoResult<Self> {
        if !Path::new(path).exists() {
            return Err(IoError::FileNotFound(path.to_string()));
        }

        Ok(Self {
            path: path.to_string(),
            delimiter,
        })
    }

    /// Parse a table from any reader (header row required)
    ///
    /// Cells are decoded lossily: invalid UTF-8 becomes U+FFFD instead of
    /// failing the whole table.
    pub fn parse<R: Read>(input: R, delimiter: u8) -> IoResult<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(input);

        let headers = reader
            .byte_headers()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?
            .iter()
            .map(decode)
            .collect::<Vec<_>>();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(IoError::InvalidFormat("missing header row".to_string()));
        }

        let mut rows = Vec::new();
        for result in reader.byte_records() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                IoError::InvalidFormat(format!("line {}: {}", line, e))
            })?;
            rows.push(record.iter().map(decode).collect());
        }

        Ok(RawTable::new(headers, rows))
    }
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}

impl TableSource for CsvReader {
    fn read_table(&self) -> IoResult<RawTable> {
        let file = File::open(&self.path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        Self::parse(BufReader::new(file), self.delimiter)
    }

    fn path(&self) -> Option<&str> {
        Some(&self.path)
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_basic() {
        let input = "Team,mu,sigma,Rank\n254,31.5,1.2,1\n1678,30.9,1.1,2\n";
        let table = CsvReader::parse(input.as_bytes(), b',').unwrap();
        assert_eq!(table.headers, vec!["Team", "mu", "sigma", "Rank"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell(1, 0), Some("1678"));
    }

    #[test]
    fn test_parse_quoted_and_short_rows() {
        let input = "Team,mu,sigma,Rank\n\"Team, Inc\",1,2,3\n99,5\n";
        let table = CsvReader::parse(input.as_bytes(), b',').unwrap();
        assert_eq!(table.cell(0, 0), Some("Team, Inc"));
        assert_eq!(table.cell(1, 2), None);
    }

    #[test]
    fn test_parse_invalid_utf8_cells() {
        let input = b"Team,mu,sigma,Rank\nBad\xffName,1500,200,1\nB,15\xfe0,150,2\n";
        let table = CsvReader::parse(&input[..], b',').unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell(0, 0), Some("Bad\u{fffd}Name"));
        assert_eq!(table.cell(1, 1), Some("15\u{fffd}0"));

        let ratings = crate::record::RatingTable::from_raw(&table).unwrap();
        assert_eq!(ratings.records()[0].mu, 1500.0);
        assert!(ratings.records()[1].mu.is_nan());
    }

    #[test]
    fn test_parse_tab_delimited() {
        let input = "Team\tmu\tsigma\trank\nA\t1500\t200\t1\n";
        let table = CsvReader::parse(input.as_bytes(), b'\t').unwrap();
        assert_eq!(table.column_index("sigma"), Some(2));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Team,mu,sigma,Rank").unwrap();
        writeln!(file, "A,1500,200,1").unwrap();

        let path = file.path().to_str().unwrap();
        let reader = CsvReader::open(path).unwrap();
        assert_eq!(reader.format_name(), "CSV");
        assert_eq!(reader.path(), Some(path));
        assert_eq!(reader.read_table().unwrap().num_rows(), 1);
    }

    #[test]
    fn test_open_missing() {
        assert!(matches!(
            CsvReader::open("/no/such/ratings.csv"),
            Err(IoError::FileNotFound(_))
        ));
    }
}
