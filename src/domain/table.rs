//! In-memory tabular result assembled from downloaded CSV files

use super::errors::MyTrackerError;
use super::result::Result;
use flate2::read::MultiGzDecoder;
use serde::Serialize;
use std::io::{Read, Write};

/// A CSV dataset: one header row plus string cells
///
/// Values are kept as the strings found in the file; typing is left to the
/// caller since the column set depends entirely on the requested selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Creates a table from headers and rows
    ///
    /// # Errors
    ///
    /// Returns an error if a row width differs from the header width
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((idx, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(MyTrackerError::Csv(format!(
                "Row {idx} has {} fields, expected {}",
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Parses a CSV stream whose first record is the header row
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self { headers, rows })
    }

    /// Decompresses a gzip payload and parses the CSV inside
    pub fn from_gzip_csv(compressed: &[u8]) -> Result<Self> {
        if compressed.is_empty() {
            return Err(MyTrackerError::Download("Empty gzip payload".to_string()));
        }

        let mut decompressed = Vec::new();
        MultiGzDecoder::new(compressed)
            .read_to_end(&mut decompressed)
            .map_err(|e| MyTrackerError::Download(format!("gzip decompression failed: {e}")))?;

        Self::from_csv_reader(decompressed.as_slice())
    }

    /// Concatenates tables, keeping file order and row order within each file
    ///
    /// Columns are the union of all headers in order of first appearance;
    /// cells missing from a table are left empty. A repeated column name is
    /// matched by its occurrence, so the second `a` of one file lines up with
    /// the second `a` of the next.
    pub fn concat(tables: Vec<DataTable>) -> Self {
        let mut keys: Vec<(String, usize)> = Vec::new();
        for table in &tables {
            for key in column_keys(&table.headers) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        let headers: Vec<String> = keys.iter().map(|(name, _)| name.clone()).collect();

        let mut rows = Vec::new();
        for table in tables {
            if table.headers == headers {
                rows.extend(table.rows);
                continue;
            }
            let table_keys = column_keys(&table.headers);
            let positions: Vec<Option<usize>> = keys
                .iter()
                .map(|k| table_keys.iter().position(|t| t == k))
                .collect();
            for row in table.rows {
                rows.push(
                    positions
                        .iter()
                        .map(|p| p.and_then(|i| row.get(i).cloned()).unwrap_or_default())
                        .collect(),
                );
            }
        }

        Self { headers, rows }
    }

    /// Column names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of the named column
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Writes the table as CSV, header first
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        if !self.headers.is_empty() {
            wtr.write_record(&self.headers)?;
        }
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Renders the table as a CSV string
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| MyTrackerError::Csv(e.to_string()))
    }
}

/// Pairs each header with how often the same name appeared before it
fn column_keys(headers: &[String]) -> Vec<(String, usize)> {
    let mut keys: Vec<(String, usize)> = Vec::with_capacity(headers.len());
    for header in headers {
        let seen = keys.iter().filter(|(name, _)| name == header).count();
        keys.push((header.clone(), seen));
    }
    keys
}
