pub mod csv_writer;

pub use csv_writer::CsvWriter;

use crate::error::Result;
use crate::models::Record;

/// Destination for the records gathered by a fetch run
pub trait RecordSink {
    /// Persist `records`, returning the number of rows written
    fn persist(&mut self, records: &[Record]) -> Result<usize>;
}
