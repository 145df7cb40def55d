//! Lenient timestamp (de)serialization
//!
//! Some collections send RFC 3339 timestamps, others send zone-less local
//! date-times such as `2024-03-01T10:15:30.123`. Zone-less values are read as UTC.
//! Epoch milliseconds and `[year, month, day, hour, minute, second, nanos]`
//! arrays are accepted too.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// `[year, month, day, hour?, minute?, second?, nanos?]`
fn from_parts(parts: &[Value]) -> Option<DateTime<Utc>> {
    let mut nums = parts.iter().map(Value::as_i64);
    let mut next = |default: i64| nums.next().unwrap_or(Some(default));

    let year = i32::try_from(next(-1)?).ok()?;
    let month = u32::try_from(next(-1)?).ok()?;
    let day = u32::try_from(next(-1)?).ok()?;
    let hour = u32::try_from(next(0)?).ok()?;
    let minute = u32::try_from(next(0)?).ok()?;
    let second = u32::try_from(next(0)?).ok()?;
    let nanos = u32::try_from(next(0)?).ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_nano_opt(hour, minute, second, nanos)
        .map(|naive| naive.and_utc())
}

pub(crate) fn from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse(raw),
        Value::Number(n) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::Array(parts) => from_parts(parts),
        _ => None,
    }
}

pub(crate) mod lenient {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        // Unreadable timestamps become None; the item itself still decodes
        Ok(from_value(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse("2024-03-01T10:15:30+02:00").unwrap();
        assert_eq!(dt.hour(), 8);
    }

    #[test]
    fn test_parse_naive_as_utc() {
        let dt = parse("2024-03-01T10:15:30.123").unwrap();
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 10);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse("yesterday").is_none());
    }

    #[test]
    fn test_epoch_millis_and_parts() {
        let millis = from_value(&json!(1714554000000u64)).unwrap();
        assert_eq!((millis.month(), millis.day(), millis.hour()), (5, 1, 9));

        let parts = from_value(&json!([2024, 5, 1, 9, 30])).unwrap();
        assert_eq!((parts.day(), parts.hour(), parts.minute(), parts.second()), (1, 9, 30, 0));

        assert!(from_value(&json!([2024, 13, 1])).is_none());
        assert!(from_value(&json!({"at": "now"})).is_none());
        assert!(from_value(&Value::Null).is_none());
    }
}
