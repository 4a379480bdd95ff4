//! Record identifiers.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::value::FieldValue;

/// Identifier of a record as issued by the backend.
///
/// The API hands out numeric primary keys for most collections and string
/// keys for a few (document numbers, SKUs); both are kept in their textual
/// form. Serialization preserves numeric ids as JSON numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form of the id, if the backend issued a number.
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// Column value of the id: numeric ids sort as numbers.
    ///
    /// Ids whose numeric form would not print back identically (`"007"`)
    /// stay text so display and export keep the backend's spelling.
    pub fn field_value(&self) -> FieldValue {
        match self.as_i64() {
            Some(n) if n.to_string() == self.0 => FieldValue::Number(n as f64),
            _ => FieldValue::text(self.0.as_str()),
        }
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_id("RecordId: empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(n) => serializer.serialize_i64(n),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Self::from(n)),
            Raw::Text(s) => Ok(Self(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_round_trip_as_numbers() {
        let id: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.as_i64(), Some(42));
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }

    #[test]
    fn string_ids_are_kept_verbatim() {
        let id: RecordId = serde_json::from_str("\"INV-0007\"").unwrap();
        assert_eq!(id.as_str(), "INV-0007");
        assert_eq!(id.as_i64(), None);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"INV-0007\"");
    }

    #[test]
    fn numeric_ids_sort_as_numbers() {
        let mut ids: Vec<RecordId> = [9, 10, 2].into_iter().map(RecordId::from).collect();
        ids.sort_by(|a, b| a.field_value().sort_cmp(&b.field_value()));

        let ordered: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(ordered, ["2", "9", "10"]);
    }

    #[test]
    fn padded_ids_stay_text() {
        assert_eq!(RecordId::new("007").field_value(), FieldValue::text("007"));
        assert_eq!(RecordId::new("INV-1").field_value(), FieldValue::text("INV-1"));
        assert_eq!(RecordId::new("12").field_value(), FieldValue::Number(12.0));
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(
            "  ".parse::<RecordId>(),
            Err(CoreError::InvalidId(_))
        ));
    }
}
