//! Field values read off records for filtering, sorting and export.

use core::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CoreError, CoreResult};

/// Placeholder shown for missing optional attributes.
pub const PLACEHOLDER: &str = "-";

/// A single attribute value of a record.
///
/// `Empty` stands for an attribute the backend left out (or sent as `null`).
/// It never causes a failure: it sorts lowest, matches no predicate, exports
/// as an empty cell and displays as [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Text-like constructor that maps blank strings to `Empty`.
    pub fn from_opt_text(value: Option<&str>) -> Self {
        match value {
            Some(s) if !s.trim().is_empty() => Self::Text(s.to_string()),
            _ => Self::Empty,
        }
    }

    pub fn from_opt_number(value: Option<f64>) -> Self {
        value.map(Self::Number).unwrap_or(Self::Empty)
    }

    pub fn from_opt_date(value: Option<NaiveDate>) -> Self {
        value.map(Self::Date).unwrap_or(Self::Empty)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Canonical text form, `None` for `Empty`.
    ///
    /// Used for categorical matching, free-text search and CSV cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::DateTime(dt) => Some(dt.to_rfc3339()),
        }
    }

    /// Calendar date of the value, if it carries one.
    ///
    /// Text values are parsed leniently so collections whose dates arrive as
    /// plain strings still take part in date-range filtering.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::DateTime(dt) => Some(dt.date_naive()),
            Self::Text(s) => parse_date(s).ok(),
            _ => None,
        }
    }

    /// Value rendered for display; missing values degrade to the placeholder.
    pub fn display(&self) -> String {
        self.as_text().unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    /// Value rendered for export; missing values are empty cells.
    pub fn export_text(&self) -> String {
        self.as_text().unwrap_or_default()
    }

    /// Total order used by sorting.
    ///
    /// `Empty` is lowest. Dates compare as timestamps (a bare date counts as
    /// midnight UTC), numbers numerically, text case-insensitively. Values of
    /// different kinds order by kind so mixed columns never panic.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (a, b) => match (a.timestamp(), b.timestamp()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }

    fn timestamp(&self) -> Option<i64> {
        match self {
            Self::Date(d) => d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc().timestamp_millis()),
            Self::DateTime(dt) => Some(dt.timestamp_millis()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::Date(_) | Self::DateTime(_) => 3,
            Self::Text(_) => 4,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

/// Parse a calendar date from user or backend input.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps (the date part is kept).
pub fn parse_date(input: &str) -> CoreResult<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(d);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| CoreError::invalid_date(format!("{trimmed:?}: {e}")))
}
