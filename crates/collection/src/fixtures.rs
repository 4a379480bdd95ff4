//! Test record type.

use chrono::NaiveDate;

use erpdesk_core::{FieldValue, Record, RecordId, SortDirection};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RecordId,
    pub date: Option<NaiveDate>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub reference: Option<String>,
}

impl Row {
    pub fn new(id: i64) -> Self {
        Self {
            id: RecordId::from(id),
            date: None,
            name: None,
            status: None,
            amount: None,
            reference: None,
        }
    }

    pub fn dated(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }
}

impl Record for Row {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "date" => FieldValue::from_opt_date(self.date),
            "name" => FieldValue::from_opt_text(self.name.as_deref()),
            "status" => FieldValue::from_opt_text(self.status.as_deref()),
            "amount" => FieldValue::from_opt_number(self.amount),
            "reference" => FieldValue::from_opt_text(self.reference.as_deref()),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "date", "name", "status", "amount", "reference"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "reference"]
    }

    fn date_field() -> Option<&'static str> {
        Some("date")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("date", SortDirection::Descending)
    }
}
