//! Filter state and predicates.
//!
//! Invariant: a cleaned `FilterState` never holds blank values. Clearing a
//! field (sending an empty string) removes it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use erpdesk_core::Record;
use erpdesk_core::value::parse_date;

use crate::error::CollectionError;

/// Partial filter update as it arrives from form inputs.
///
/// `None` leaves a field alone; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub query: Option<String>,
    pub categories: Vec<(String, String)>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl FilterPatch {
    pub fn query(mut self, text: impl Into<String>) -> Self {
        self.query = Some(text.into());
        self
    }

    pub fn category(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.categories.push((field.into(), value.into()));
        self
    }

    pub fn date_from(mut self, date: impl Into<String>) -> Self {
        self.from = Some(date.into());
        self
    }

    pub fn date_to(mut self, date: impl Into<String>) -> Self {
        self.to = Some(date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.categories.is_empty() && self.from.is_none() && self.to.is_none()
    }

    /// Split off the free-text part, which is applied on a different clock.
    pub fn take_query(&mut self) -> Option<String> {
        self.query.take()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    categories: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

fn cleaned(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_bound(bound: &'static str, raw: &str) -> Result<Option<NaiveDate>, CollectionError> {
    match cleaned(raw) {
        None => Ok(None),
        Some(text) => parse_date(&text).map(Some).map_err(|e| CollectionError::InvalidDate {
            bound,
            reason: e.to_string(),
        }),
    }
}

impl FilterState {
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn category(&self, field: &str) -> Option<&str> {
        self.categories.get(field).map(String::as_str)
    }

    pub fn categories(&self) -> &BTreeMap<String, String> {
        &self.categories
    }

    pub fn date_from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn date_to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge `patch` into the state.
    ///
    /// Dates are validated before anything is written, so a bad bound leaves
    /// the state exactly as it was.
    pub fn apply(&mut self, patch: FilterPatch) -> Result<(), CollectionError> {
        let from = patch
            .from
            .as_deref()
            .map(|raw| parse_bound("from", raw))
            .transpose()?;
        let to = patch
            .to
            .as_deref()
            .map(|raw| parse_bound("to", raw))
            .transpose()?;

        if let Some(text) = patch.query {
            self.set_query(&text);
        }
        for (field, value) in patch.categories {
            match cleaned(&value) {
                Some(v) => {
                    self.categories.insert(field, v);
                }
                None => {
                    self.categories.remove(&field);
                }
            }
        }
        if let Some(from) = from {
            self.from = from;
        }
        if let Some(to) = to {
            self.to = to;
        }
        Ok(())
    }

    /// Replace the free-text query; blank text removes it.
    pub fn set_query(&mut self, text: &str) {
        self.query = cleaned(text);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when `record` satisfies every active predicate.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_categories(record) && self.matches_dates(record) && self.matches_query(record)
    }

    fn matches_categories<R: Record>(&self, record: &R) -> bool {
        self.categories
            .iter()
            .all(|(field, expected)| record.field(field).as_text().as_deref() == Some(expected.as_str()))
    }

    fn matches_dates<R: Record>(&self, record: &R) -> bool {
        if self.from.is_none() && self.to.is_none() {
            return true;
        }
        let Some(date) = R::date_field().and_then(|f| record.field(f).as_date()) else {
            return false;
        };
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }

    fn matches_query<R: Record>(&self, record: &R) -> bool {
        match &self.query {
            None => true,
            Some(q) => record.search_text().contains(&q.to_lowercase()),
        }
    }
}
