use crate::error::Result;
use crate::models::{CleanRow, Record, TableRow};
use crate::utils::constants::TABLE_COLUMNS;
use crate::writers::RecordSink;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes the four-column restroom table
///
/// Output goes to a temporary file next to the target which then replaces
/// it, so readers never see a half-written table.
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Project records onto the table and write them
    pub fn write_records(&self, records: &[Record]) -> Result<usize> {
        let rows: Vec<TableRow> = records.iter().map(TableRow::from).collect();
        self.write_rows(&rows)
    }

    pub fn write_clean_rows(&self, rows: &[CleanRow]) -> Result<usize> {
        let rows: Vec<TableRow> = rows.iter().map(CleanRow::to_table_row).collect();
        self.write_rows(&rows)
    }

    /// Write rows under the `name,address,latitude,longitude` header
    pub fn write_rows(&self, rows: &[TableRow]) -> Result<usize> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let temp_file = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp_file.as_file());
            writer.write_record(TABLE_COLUMNS)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }

        temp_file.persist(&self.path).map_err(|e| e.error)?;
        Ok(rows.len())
    }
}

impl RecordSink for CsvWriter {
    fn persist(&mut self, records: &[Record]) -> Result<usize> {
        let rows = self.write_records(records)?;
        tracing::info!(rows, path = %self.path.display(), "Wrote restroom table");
        Ok(rows)
    }
}
