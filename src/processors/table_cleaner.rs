use crate::error::Result;
use crate::models::{CleanRow, TableRow};
use crate::readers::TableReader;
use crate::writers::CsvWriter;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}

impl CleanReport {
    pub fn summary(&self) -> String {
        format!(
            "Rows read: {}\nRows kept: {}\nRemoved {} rows with invalid coordinates",
            self.rows_read, self.rows_kept, self.rows_dropped
        )
    }
}

/// Post-download cleanup of a restroom table
///
/// Keeps `name,address,latitude,longitude`, coerces the coordinates to
/// numbers and drops rows where either one is missing. The input is read
/// by its `address` column; the download step has already renamed
/// `street`.
pub struct TableCleaner {
    reader: TableReader,
}

impl TableCleaner {
    pub fn new() -> Self {
        Self {
            reader: TableReader::new(),
        }
    }

    /// Keep rows whose coordinates both parse
    pub fn clean_rows(&self, rows: &[TableRow]) -> Vec<CleanRow> {
        rows.iter().filter_map(TableRow::to_clean).collect()
    }

    /// Clean the table at `path` in place
    pub fn clean_file(&self, path: &Path) -> Result<CleanReport> {
        let table = self.reader.read_table(path)?;
        info!(columns = ?table.columns, "Available columns");

        let cleaned = self.clean_rows(&table.rows);
        let rows_kept = CsvWriter::new(path).write_clean_rows(&cleaned)?;

        let report = CleanReport {
            rows_read: table.rows.len(),
            rows_kept,
            rows_dropped: table.rows.len() - rows_kept,
        };

        info!(
            path = %path.display(),
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped,
            "Updated restroom table"
        );

        Ok(report)
    }
}

impl Default for TableCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Clean the table at `path`, overwriting it
pub fn clean_table(path: &Path) -> Result<CleanReport> {
    TableCleaner::new().clean_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RefugeError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const RAW_TABLE: &str = "\
name,address,latitude,longitude
Central Library,123 Main St,45.5,-122.6
No Coordinates,1 Elm St,,
Bad Latitude,2 Oak Ave,north,-122.7
String Coordinates,3 Pine Rd,\"45.5\",\"-122\"
Half Missing,4 Ash Ln,45.1,
";

    fn write_table(dir: &TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("refuge_data.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_clean_drops_invalid_coordinates() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = write_table(&temp_dir, RAW_TABLE);

        let report = clean_table(&path)?;

        assert_eq!(
            report,
            CleanReport {
                rows_read: 5,
                rows_kept: 2,
                rows_dropped: 3
            }
        );
        assert_eq!(
            fs::read_to_string(&path)?,
            "name,address,latitude,longitude\n\
             Central Library,123 Main St,45.5,-122.6\n\
             String Coordinates,3 Pine Rd,45.5,-122.0\n"
        );

        Ok(())
    }

    #[test]
    fn test_clean_is_idempotent() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = write_table(&temp_dir, RAW_TABLE);

        clean_table(&path)?;
        let first = fs::read_to_string(&path)?;

        let report = clean_table(&path)?;
        let second = fs::read_to_string(&path)?;

        assert_eq!(first, second);
        assert_eq!(report.rows_dropped, 0);

        Ok(())
    }

    #[test]
    fn test_clean_drops_extra_columns() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = write_table(
            &temp_dir,
            "id,name,address,latitude,longitude,accessible\n9,Park,5 Fir St,45.25,-122.5,true\n",
        );

        clean_table(&path)?;

        assert_eq!(
            fs::read_to_string(&path)?,
            "name,address,latitude,longitude\nPark,5 Fir St,45.25,-122.5\n"
        );

        Ok(())
    }

    #[test]
    fn test_missing_column_leaves_file_untouched() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let original = "name,street,latitude,longitude\nLibrary,123 Main St,45.5,-122.6\n";
        let path = write_table(&temp_dir, original);

        let result = clean_table(&path);

        assert!(matches!(result, Err(RefugeError::MissingColumn(_))));
        assert_eq!(fs::read_to_string(&path)?, original);

        Ok(())
    }

    #[test]
    fn test_clean_rows_coerces_strings() {
        let rows = vec![
            TableRow::new(
                "Kept".to_string(),
                "1 Main St".to_string(),
                "45.5".to_string(),
                "-122.6".to_string(),
            ),
            TableRow::new(
                "Dropped".to_string(),
                "2 Main St".to_string(),
                "".to_string(),
                "-122.6".to_string(),
            ),
        ];

        let cleaned = TableCleaner::new().clean_rows(&rows);

        assert_eq!(cleaned.len(), 1);
        assert_eq!(cleaned[0].name, "Kept");
        assert_eq!(cleaned[0].latitude, 45.5);
    }
}
