use crate::error::{RefugeError, Result};
use crate::models::TableRow;
use crate::utils::constants::{COLUMN_ADDRESS, COLUMN_LATITUDE, COLUMN_LONGITUDE, COLUMN_NAME};
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

/// A persisted table as read back from disk
#[derive(Debug, Clone)]
pub struct Table {
    /// Every column in the file header, in file order
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

/// Positions of the kept columns within a file's header
struct ColumnIndex {
    name: usize,
    address: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or_else(|| RefugeError::MissingColumn(column.to_string()))
        };

        Ok(Self {
            name: find(COLUMN_NAME)?,
            address: find(COLUMN_ADDRESS)?,
            latitude: find(COLUMN_LATITUDE)?,
            longitude: find(COLUMN_LONGITUDE)?,
        })
    }

    fn row(&self, record: &StringRecord) -> TableRow {
        let cell = |index: usize| record.get(index).unwrap_or_default().to_string();
        TableRow::new(
            cell(self.name),
            cell(self.address),
            cell(self.latitude),
            cell(self.longitude),
        )
    }
}

/// Reads a restroom table by column name
///
/// Extra columns are tolerated and dropped; the four kept columns must
/// all be present.
pub struct TableReader {
    limit: usize,
}

impl TableReader {
    pub fn new() -> Self {
        Self { limit: 0 }
    }

    /// Stop after `limit` rows (0 = all rows)
    pub fn with_limit(limit: usize) -> Self {
        Self { limit }
    }

    pub fn read_table(&self, path: &Path) -> Result<Table> {
        let mut reader = ReaderBuilder::new().flexible(true).from_path(path)?;

        let headers = reader.headers()?.clone();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();
        let index = ColumnIndex::from_headers(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            if self.limit > 0 && rows.len() >= self.limit {
                break;
            }
            let record = result?;
            rows.push(index.row(&record));
        }

        Ok(Table { columns, rows })
    }

    pub fn read_rows(&self, path: &Path) -> Result<Vec<TableRow>> {
        Ok(self.read_table(path)?.rows)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}
