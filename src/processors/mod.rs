pub mod table_cleaner;

pub use table_cleaner::{clean_table, CleanReport, TableCleaner};
