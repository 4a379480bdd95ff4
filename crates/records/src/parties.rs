//! Clients and suppliers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erpdesk_core::de::{opt_date, opt_text};
use erpdesk_core::{FieldValue, Record, RecordId, SortDirection};

use crate::resource::Endpoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub created_at: Option<NaiveDate>,
}

impl Record for Client {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "name" => FieldValue::from_opt_text(self.name.as_deref()),
            "email" => FieldValue::from_opt_text(self.email.as_deref()),
            "phone" => FieldValue::from_opt_text(self.phone.as_deref()),
            "city" => FieldValue::from_opt_text(self.city.as_deref()),
            "created_at" => FieldValue::from_opt_date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email", "phone", "city", "created_at"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "email", "phone"]
    }

    fn date_field() -> Option<&'static str> {
        Some("created_at")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("name", SortDirection::Ascending)
    }
}

impl Endpoint for Client {
    const PATH: &'static str = "/parties/clients/";
    const EXPORT_PREFIX: &'static str = "clients";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub created_at: Option<NaiveDate>,
}

impl Record for Supplier {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "name" => FieldValue::from_opt_text(self.name.as_deref()),
            "contact_person" => FieldValue::from_opt_text(self.contact_person.as_deref()),
            "email" => FieldValue::from_opt_text(self.email.as_deref()),
            "phone" => FieldValue::from_opt_text(self.phone.as_deref()),
            "created_at" => FieldValue::from_opt_date(self.created_at),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "contact_person", "email", "phone", "created_at"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["name", "contact_person", "email"]
    }

    fn date_field() -> Option<&'static str> {
        Some("created_at")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("name", SortDirection::Ascending)
    }
}

impl Endpoint for Supplier {
    const PATH: &'static str = "/parties/suppliers/";
    const EXPORT_PREFIX: &'static str = "suppliers";
}
