//! CSV input: header validation and row extraction

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::ImportError;

/// Columns every import file must carry
pub const REQUIRED_COLUMNS: &[&str] = &["die_roll", "name", "purchase", "sale"];

/// One parsed data line: column name to raw cell text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    fields: Vec<(String, String)>,
}

impl ImportRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Raw cell for `column`, or None when the row has no such column
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Render the row for progress and error messages
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}={:?}", name, value))
            .collect();
        format!("{{{}}}", parts.join(", "))
    }
}

/// An open import file whose header has been validated
pub struct ImportReader {
    reader: csv::Reader<BufReader<File>>,
    headers: Vec<String>,
}

impl ImportReader {
    /// Open `path` and check that the header carries [`REQUIRED_COLUMNS`]
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let header_record = reader
            .headers()
            .map_err(|source| ImportError::Header {
                path: path.to_path_buf(),
                source,
            })?
            .clone();
        let headers = normalize_headers(&header_record);

        let missing = missing_columns(&headers);
        if !missing.is_empty() {
            return Err(ImportError::Schema { missing });
        }

        Ok(Self { reader, headers })
    }

    /// Normalized header names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Iterate data rows as (record number, parsed row)
    ///
    /// Record numbers are 1-based and count the header record, so the first
    /// data row is 2. Blank lines and line breaks inside quoted cells do not
    /// advance them, so they match spreadsheet row numbers rather than
    /// physical lines of the file.
    pub fn rows(&mut self) -> impl Iterator<Item = (usize, Result<ImportRow, csv::Error>)> + '_ {
        let headers = &self.headers;
        self.reader
            .records()
            .enumerate()
            .map(move |(idx, result)| {
                let row = result.map(|record| {
                    ImportRow::new(
                        headers
                            .iter()
                            .zip(record.iter())
                            .map(|(h, v)| (h.clone(), v.to_string()))
                            .collect(),
                    )
                });
                (idx + 2, row)
            })
    }
}

fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_lowercase()).collect()
}

fn missing_columns(headers: &[String]) -> Vec<String> {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    REQUIRED_COLUMNS
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect()
}
