use crate::error::Result;
use crate::models::TableRow;
use crate::readers::TableReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeographicBounds {
    fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            min_lat: latitude,
            max_lat: latitude,
            min_lon: longitude,
            max_lon: longitude,
        }
    }

    fn include(&mut self, latitude: f64, longitude: f64) {
        self.min_lat = self.min_lat.min(latitude);
        self.max_lat = self.max_lat.max(latitude);
        self.min_lon = self.min_lon.min(longitude);
        self.max_lon = self.max_lon.max(longitude);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableStatistics {
    pub total_rows: usize,
    pub valid_coordinates: usize,
    pub missing_coordinates: usize,
    pub out_of_range: usize,
    pub missing_names: usize,
    pub missing_addresses: usize,
    /// `None` when no row has usable coordinates
    pub bounds: Option<GeographicBounds>,
}

impl TableStatistics {
    pub fn valid_percentage(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        (self.valid_coordinates as f64 / self.total_rows as f64) * 100.0
    }

    /// True when a cleaning pass would not drop anything
    pub fn is_clean(&self) -> bool {
        self.missing_coordinates == 0
    }

    pub fn summary(&self) -> String {
        let coverage = match &self.bounds {
            Some(bounds) => format!(
                "{:.4} to {:.4} lat, {:.4} to {:.4} lon",
                bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
            ),
            None => "No valid coordinates".to_string(),
        };

        format!(
            "Rows: {} total\n\
            Coordinates: {} valid ({:.1}%), {} missing or invalid, {} out of range\n\
            Missing fields: {} names, {} addresses\n\
            Coverage: {}",
            self.total_rows,
            self.valid_coordinates,
            self.valid_percentage(),
            self.missing_coordinates,
            self.out_of_range,
            self.missing_names,
            self.missing_addresses,
            coverage
        )
    }
}

pub struct TableAnalyzer;

impl TableAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, path: &Path) -> Result<TableStatistics> {
        let rows = TableReader::new().read_rows(path)?;
        Ok(self.analyze_rows(&rows))
    }

    pub fn analyze_rows(&self, rows: &[TableRow]) -> TableStatistics {
        let mut stats = TableStatistics {
            total_rows: rows.len(),
            valid_coordinates: 0,
            missing_coordinates: 0,
            out_of_range: 0,
            missing_names: 0,
            missing_addresses: 0,
            bounds: None,
        };

        for row in rows {
            if row.name.trim().is_empty() {
                stats.missing_names += 1;
            }
            if row.address.trim().is_empty() {
                stats.missing_addresses += 1;
            }

            let Some(clean) = row.to_clean() else {
                stats.missing_coordinates += 1;
                continue;
            };

            if !clean.is_within_bounds() {
                stats.out_of_range += 1;
                continue;
            }

            stats.valid_coordinates += 1;
            let bounds = match stats.bounds.take() {
                Some(mut bounds) => {
                    bounds.include(clean.latitude, clean.longitude);
                    bounds
                }
                None => GeographicBounds::around(clean.latitude, clean.longitude),
            };
            stats.bounds = Some(bounds);
        }

        stats
    }
}

impl Default for TableAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
