//! The `Record` trait: one item of a homogeneous collection.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::value::FieldValue;

/// Sort direction for a collection column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// An item surfaced in a table (invoice, quote, stock item, ...).
///
/// Implementors describe their columns once; the collection view uses that
/// description for filtering, sorting and export and never needs to know the
/// concrete type.
pub trait Record {
    /// Unique key of the record within its collection.
    fn id(&self) -> &RecordId;

    /// Value of the named field. Unknown or missing fields are `Empty`.
    fn field(&self, name: &str) -> FieldValue;

    /// Column names in export order (CSV header).
    fn columns() -> &'static [&'static str]
    where
        Self: Sized;

    /// Fields concatenated for free-text search.
    fn searchable_fields() -> &'static [&'static str]
    where
        Self: Sized;

    /// Field the `from`/`to` date range applies to.
    fn date_field() -> Option<&'static str>
    where
        Self: Sized,
    {
        None
    }

    /// Sort applied when a view is first mounted.
    fn default_sort() -> (&'static str, SortDirection)
    where
        Self: Sized,
    {
        ("id", SortDirection::Ascending)
    }

    /// Space-joined searchable fields, lowercased.
    fn search_text(&self) -> String
    where
        Self: Sized,
    {
        Self::searchable_fields()
            .iter()
            .filter_map(|f| self.field(f).as_text())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }
}
