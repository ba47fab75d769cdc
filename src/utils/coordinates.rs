use crate::utils::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Coerce a table cell to a coordinate value
///
/// Empty, non-numeric and non-finite cells are treated as missing. Unlike
/// a lenient numeric coercion, `inf` and `Infinity` are rejected too.
///
/// # Examples
/// ```
/// use refuge_fetch::utils::parse_coordinate;
///
/// assert_eq!(parse_coordinate("45.5"), Some(45.5));
/// assert_eq!(parse_coordinate(""), None);
/// assert_eq!(parse_coordinate("north"), None);
/// ```
pub fn parse_coordinate(coord_str: &str) -> Option<f64> {
    let trimmed = coord_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Render a coordinate the way it is stored in a cleaned table
///
/// Whole numbers keep one decimal place so that the column reads as
/// floating point; everything else uses the shortest round-tripping form.
pub fn format_coordinate(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// Check a coordinate pair against WGS84 bounds
pub fn is_within_wgs84(latitude: f64, longitude: f64) -> bool {
    (MIN_LATITUDE..=MAX_LATITUDE).contains(&latitude)
        && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&longitude)
}
