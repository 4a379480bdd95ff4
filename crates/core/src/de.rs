//! Lenient serde helpers for backend payloads.
//!
//! The API serializes decimals as strings (`"1250.00"`) and sometimes sends
//! blank strings where a value is unset. These helpers accept both shapes and
//! map anything unusable to `None` instead of failing the whole collection.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::value::parse_date;

/// Deserialize a number sent either as a JSON number or a numeric string.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Deserialize a date sent as `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn opt_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| parse_date(&s).ok()))
}

/// Deserialize a string, treating blanks as absent.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}
