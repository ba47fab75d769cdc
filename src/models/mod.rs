pub mod record;
pub mod row;

pub use record::Record;
pub use row::{CleanRow, TableRow};
