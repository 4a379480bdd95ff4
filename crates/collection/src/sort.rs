//! Sort state and the stable sort used by `derive`.

use serde::{Deserialize, Serialize};

use erpdesk_core::{FieldValue, Record, SortDirection};

/// Exactly one active sort column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn ascending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Descending)
    }

    /// Column default of the record type.
    pub fn default_for<R: Record>() -> Self {
        let (field, direction) = R::default_sort();
        Self::new(field, direction)
    }

    /// Header-click behaviour: same column flips, new column starts ascending.
    pub fn toggled(&self, field: &str) -> Self {
        if self.field == field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::ascending(field)
        }
    }

    /// Stable in-place sort of `rows`.
    ///
    /// Keys are read once per row. Equal keys keep their incoming order in
    /// both directions; `Empty` keys land first ascending and last descending.
    pub fn sort<'a, R: Record>(&self, rows: &mut Vec<&'a R>) {
        let mut keyed: Vec<(FieldValue, &'a R)> = rows
            .drain(..)
            .map(|r| (r.field(&self.field), r))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match self.direction {
            SortDirection::Ascending => a.sort_cmp(b),
            SortDirection::Descending => b.sort_cmp(a),
        });

        rows.extend(keyed.into_iter().map(|(_, r)| r));
    }
}
