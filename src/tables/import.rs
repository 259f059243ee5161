//! JSON import/export for rate tables
//!
//! The interchange format is one flat object per table, keyed by the
//! integer year-end or month offset as a string:
//! `{"2023": 0.116, "2024": 0.082}`. Anything else is rejected at the
//! boundary and the in-memory table is left untouched by the caller.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::table::RateTable;

/// Reasons an external table payload is rejected
#[derive(Debug, Error)]
pub enum TableImportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a flat object of numeric values")]
    NotAnObject,

    #[error("key {0:?} is not an integer")]
    BadKey(String),

    #[error("value for key {0:?} is not a finite number")]
    BadValue(String),
}

/// Parse an external JSON payload into a rate table.
///
/// Succeeds only for a flat `{"<int>": <number>}` object; on any error
/// no table is produced, so callers keep their current mapping.
pub fn parse_table_json(text: &str) -> Result<RateTable, TableImportError> {
    let value: Value = serde_json::from_str(text)?;
    let object = value.as_object().ok_or(TableImportError::NotAnObject)?;

    let mut table = RateTable::new();
    for (key, entry) in object {
        let parsed_key: i32 = key
            .trim()
            .parse()
            .map_err(|_| TableImportError::BadKey(key.clone()))?;
        let parsed_value = entry
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TableImportError::BadValue(key.clone()))?;
        table.insert(parsed_key, parsed_value);
    }

    Ok(table)
}

/// Serialise a rate table to the interchange format, keys in ascending order
pub fn table_to_json(table: &RateTable) -> String {
    let mut object = Map::new();
    for &(key, value) in table.entries() {
        let number = Number::from_f64(value).unwrap_or_else(|| Number::from(0));
        object.insert(key.to_string(), Value::Number(number));
    }
    serde_json::to_string_pretty(&Value::Object(object)).unwrap_or_else(|_| "{}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_table() {
        let table = parse_table_json(r#"{"2023": 0.116, "2024": 0.082}"#).unwrap();

        assert_eq!(table.rate(2023), 0.116);
        assert_eq!(table.rate(2024), 0.082);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(matches!(
            parse_table_json("[1, 2, 3]"),
            Err(TableImportError::NotAnObject)
        ));
        assert!(matches!(
            parse_table_json("0.116"),
            Err(TableImportError::NotAnObject)
        ));
    }

    #[test]
    fn test_parse_rejects_bad_entries() {
        assert!(matches!(
            parse_table_json(r#"{"next year": 0.1}"#),
            Err(TableImportError::BadKey(_))
        ));
        assert!(matches!(
            parse_table_json(r#"{"2023": "high"}"#),
            Err(TableImportError::BadValue(_))
        ));
        assert!(matches!(
            parse_table_json("not json"),
            Err(TableImportError::Json(_))
        ));
    }

    #[test]
    fn test_round_trip_preserves_mapping() {
        let table = RateTable::from_pairs([(0, 1.0), (12, 0.9236), (24, 0.8598)]);

        let reimported = parse_table_json(&table_to_json(&table)).unwrap();

        assert_eq!(reimported.entries().len(), table.entries().len());
        for (&(key, value), &(rekey, revalue)) in
            table.entries().iter().zip(reimported.entries())
        {
            assert_eq!(key, rekey);
            assert!((value - revalue).abs() < 1e-12);
        }
    }
}
