pub mod table_analyzer;

pub use table_analyzer::{GeographicBounds, TableAnalyzer, TableStatistics};
