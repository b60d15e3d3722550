//! Raw attribute records and the coercion rules used to read them.
//!
//! Server responses are inconsistent about scalar types: the JSON API sends
//! most numbers as numbers, the XML API (and a handful of JSON fields) sends
//! them as strings. Every reader here accepts both shapes and fails loudly
//! with [`AttributeError::Malformed`] when a present value cannot be read.
//! A missing key, or a JSON `null`, is reported as `Ok(None)`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use crate::error::AttributeError;

/// One decoded attribute mapping as returned by the server.
pub type RawRecord = Map<String, Value>;

fn present<'a>(record: &'a RawRecord, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

fn malformed(field: &str, value: &Value) -> AttributeError {
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    AttributeError::Malformed {
        field: field.to_string(),
        value,
    }
}

fn truncate(value: f64) -> Option<i64> {
    if value.is_finite() && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        Some(value.trunc() as i64)
    } else {
        None
    }
}

fn coerce_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn timestamp(seconds: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(seconds, 0).single()
}

fn coerce_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(timestamp),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(seconds) = s.parse::<i64>() {
                return timestamp(seconds);
            }
            if let Ok(parsed) = DateTime::parse_from_rfc3339(s) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "0" | "false" => Some(false),
            "1" | "true" => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Reads a text field. Numbers and booleans are stringified.
pub fn string_field(record: &RawRecord, field: &str) -> Result<Option<String>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(malformed(field, other)),
    }
}

/// Reads an integer field, truncating fractional values.
pub fn int_field(record: &RawRecord, field: &str) -> Result<Option<i64>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => coerce_int(value)
            .map(Some)
            .ok_or_else(|| malformed(field, value)),
    }
}

/// Reads a non-negative integer key such as `ratingKey`.
pub fn key_field(record: &RawRecord, field: &str) -> Result<Option<u64>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => coerce_int(value)
            .and_then(|n| u64::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| malformed(field, value)),
    }
}

pub fn float_field(record: &RawRecord, field: &str) -> Result<Option<f64>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => coerce_float(value)
            .map(Some)
            .ok_or_else(|| malformed(field, value)),
    }
}

/// Reads a timestamp field. Accepts unix seconds, RFC 3339,
/// `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn datetime_field(record: &RawRecord, field: &str) -> Result<Option<DateTime<Utc>>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => coerce_datetime(value)
            .map(Some)
            .ok_or_else(|| malformed(field, value)),
    }
}

pub fn bool_field(record: &RawRecord, field: &str) -> Result<Option<bool>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(value) => coerce_bool(value)
            .map(Some)
            .ok_or_else(|| malformed(field, value)),
    }
}

/// Reads a nested list of records (`Media`, `Part`, ...).
///
/// A single object is accepted as a one-element list, which is how
/// single-child elements come out of XML decoders.
pub fn records_field<'a>(record: &'a RawRecord, field: &str) -> Result<Option<Vec<&'a RawRecord>>, AttributeError> {
    match present(record, field) {
        None => Ok(None),
        Some(Value::Array(values)) => values
            .iter()
            .map(|value| value.as_object().ok_or_else(|| malformed(field, value)))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(Value::Object(object)) => Ok(Some(vec![object])),
        Some(other) => Err(malformed(field, other)),
    }
}

/// Overwrites `slot` only when a value was read.
pub(crate) fn assign<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(value) = value {
        *slot = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn record(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_and_null_are_absent() {
        let r = record(json!({"year": null}));
        assert_eq!(int_field(&r, "year").unwrap(), None);
        assert_eq!(int_field(&r, "leafCount").unwrap(), None);
        assert_eq!(string_field(&r, "title").unwrap(), None);
    }

    #[test]
    fn test_int_coercion() {
        let r = record(json!({"a": 12, "b": "34", "c": "5.9", "d": 7.8, "e": "abc"}));
        assert_eq!(int_field(&r, "a").unwrap(), Some(12));
        assert_eq!(int_field(&r, "b").unwrap(), Some(34));
        assert_eq!(int_field(&r, "c").unwrap(), Some(5));
        assert_eq!(int_field(&r, "d").unwrap(), Some(7));

        let err = int_field(&r, "e").unwrap_err();
        assert_eq!(err.field(), "e");
        assert_eq!(err.value(), "abc");
    }

    #[test]
    fn test_key_rejects_negative() {
        let r = record(json!({"ratingKey": "-4"}));
        assert!(key_field(&r, "ratingKey").is_err());
    }

    #[test]
    fn test_float_coercion() {
        let r = record(json!({"rating": "7.5", "audienceRating": 8, "bad": "NaN"}));
        assert_eq!(float_field(&r, "rating").unwrap(), Some(7.5));
        assert_eq!(float_field(&r, "audienceRating").unwrap(), Some(8.0));
        assert!(float_field(&r, "bad").is_err());
    }

    #[test]
    fn test_datetime_coercion() {
        let r = record(json!({
            "addedAt": 1_300_000_000,
            "updatedAt": "1300000000",
            "originallyAvailableAt": "2010-05-03",
            "lastViewedAt": "2021-01-02T03:04:05Z",
            "scannedAt": "2021-01-02 03:04:05",
            "bad": "yesterday",
        }));
        let added = datetime_field(&r, "addedAt").unwrap().unwrap();
        assert_eq!(added.timestamp(), 1_300_000_000);
        assert_eq!(datetime_field(&r, "updatedAt").unwrap(), Some(added));

        let available = datetime_field(&r, "originallyAvailableAt").unwrap().unwrap();
        assert_eq!((available.year(), available.month(), available.day()), (2010, 5, 3));

        assert!(datetime_field(&r, "lastViewedAt").unwrap().is_some());
        assert!(datetime_field(&r, "scannedAt").unwrap().is_some());

        let err = datetime_field(&r, "bad").unwrap_err();
        assert_eq!(err.value(), "yesterday");
    }

    #[test]
    fn test_string_field_stringifies_numbers() {
        let r = record(json!({"key": 5, "title": ["x"]}));
        assert_eq!(string_field(&r, "key").unwrap(), Some("5".to_string()));
        assert!(string_field(&r, "title").is_err());
    }

    #[test]
    fn test_records_field_shapes() {
        let r = record(json!({
            "Part": [{"id": 1}, {"id": 2}],
            "Single": {"id": 3},
            "Broken": [1, 2],
        }));
        assert_eq!(records_field(&r, "Part").unwrap().unwrap().len(), 2);
        assert_eq!(records_field(&r, "Single").unwrap().unwrap().len(), 1);
        assert!(records_field(&r, "Broken").is_err());
        assert!(records_field(&r, "Missing").unwrap().is_none());
    }

    #[test]
    fn test_bool_coercion() {
        let r = record(json!({"a": true, "b": "0", "c": 1, "d": "maybe"}));
        assert_eq!(bool_field(&r, "a").unwrap(), Some(true));
        assert_eq!(bool_field(&r, "b").unwrap(), Some(false));
        assert_eq!(bool_field(&r, "c").unwrap(), Some(true));
        assert!(bool_field(&r, "d").is_err());
    }
}
