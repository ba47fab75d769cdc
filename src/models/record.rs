use crate::utils::constants::{FIELD_LATITUDE, FIELD_LONGITUDE, FIELD_NAME, FIELD_STREET};
use serde_json::{Map, Value};

/// One restroom listing as returned by the API
///
/// Records are kept as the raw JSON object so that fields the table does
/// not use survive untouched in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record from a JSON value, returning `None` unless it is an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Text of a field as it appears in a table cell
    ///
    /// Missing and null fields are empty; strings are verbatim; everything
    /// else uses its compact JSON text.
    pub fn cell(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn name(&self) -> String {
        self.cell(FIELD_NAME)
    }

    pub fn street(&self) -> String {
        self.cell(FIELD_STREET)
    }

    pub fn latitude(&self) -> String {
        self.cell(FIELD_LATITUDE)
    }

    pub fn longitude(&self) -> String {
        self.cell(FIELD_LONGITUDE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_cells_from_api_fields() {
        let record = record(json!({
            "id": 42,
            "name": "Powell's Books",
            "street": "1005 W Burnside St",
            "latitude": 45.5230,
            "longitude": -122.6814,
            "accessible": true
        }));

        assert_eq!(record.name(), "Powell's Books");
        assert_eq!(record.street(), "1005 W Burnside St");
        assert_eq!(record.latitude(), "45.523");
        assert_eq!(record.longitude(), "-122.6814");
        assert_eq!(record.cell("accessible"), "true");
    }

    #[test]
    fn test_missing_and_null_fields_are_empty() {
        let record = record(json!({"name": "Cafe", "latitude": null}));

        assert_eq!(record.street(), "");
        assert_eq!(record.latitude(), "");
        assert_eq!(record.longitude(), "");
    }

    #[test]
    fn test_string_coordinates_are_verbatim() {
        let record = record(json!({"latitude": "45.5", "longitude": ""}));

        assert_eq!(record.latitude(), "45.5");
        assert_eq!(record.longitude(), "");
    }

    #[test]
    fn test_non_object_values_are_rejected() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("text")).is_none());
        assert!(Record::from_value(Value::Null).is_none());
    }
}
