use crate::models::Record;
use crate::utils::coordinates::{format_coordinate, is_within_wgs84, parse_coordinate};
use serde::Serialize;

/// A row of the persisted table, every cell still as text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub name: String,
    pub address: String,
    pub latitude: String,
    pub longitude: String,
}

impl TableRow {
    pub fn new(name: String, address: String, latitude: String, longitude: String) -> Self {
        Self {
            name,
            address,
            latitude,
            longitude,
        }
    }

    /// Coerce the coordinates, returning `None` when either is missing
    pub fn to_clean(&self) -> Option<CleanRow> {
        let latitude = parse_coordinate(&self.latitude)?;
        let longitude = parse_coordinate(&self.longitude)?;

        Some(CleanRow {
            name: self.name.clone(),
            address: self.address.clone(),
            latitude,
            longitude,
        })
    }
}

impl From<&Record> for TableRow {
    /// Project a record onto the table, renaming `street` to `address`
    fn from(record: &Record) -> Self {
        Self::new(
            record.name(),
            record.street(),
            record.latitude(),
            record.longitude(),
        )
    }
}

/// A row that survived cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRow {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CleanRow {
    /// Whether the coordinates fall inside WGS84 bounds
    pub fn is_within_bounds(&self) -> bool {
        is_within_wgs84(self.latitude, self.longitude)
    }

    pub fn to_table_row(&self) -> TableRow {
        TableRow::new(
            self.name.clone(),
            self.address.clone(),
            format_coordinate(self.latitude),
            format_coordinate(self.longitude),
        )
    }
}
