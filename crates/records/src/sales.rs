//! Invoices, quotes and sales orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erpdesk_core::de::{opt_date, opt_number, opt_text};
use erpdesk_core::{FieldValue, Record, RecordId, SortDirection};

use crate::action::{Action, Workflow};
use crate::resource::Endpoint;

pub const PAID: &str = "paid";
pub const UNPAID: &str = "unpaid";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub number: Option<String>,
    #[serde(default, alias = "client_name", deserialize_with = "opt_text")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total: Option<f64>,
    #[serde(default)]
    pub paid: bool,
}

impl Invoice {
    /// Unpaid and past due on `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.paid && self.due_date.is_some_and(|due| due < today)
    }
}

impl Record for Invoice {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "number" => FieldValue::from_opt_text(self.number.as_deref()),
            "client" => FieldValue::from_opt_text(self.client.as_deref()),
            "issue_date" => FieldValue::from_opt_date(self.issue_date),
            "due_date" => FieldValue::from_opt_date(self.due_date),
            "total" => FieldValue::from_opt_number(self.total),
            "paid" => FieldValue::text(self.status()),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "number", "client", "issue_date", "due_date", "total", "paid"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["number", "client"]
    }

    fn date_field() -> Option<&'static str> {
        Some("issue_date")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("issue_date", SortDirection::Descending)
    }
}

impl Workflow for Invoice {
    fn status(&self) -> &str {
        if self.paid { PAID } else { UNPAID }
    }

    fn allows(&self, action: Action) -> bool {
        action == Action::MarkPaid && !self.paid
    }
}

impl Endpoint for Invoice {
    const PATH: &'static str = "/sales/invoices/";
    const EXPORT_PREFIX: &'static str = "invoices";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub number: Option<String>,
    #[serde(default, alias = "client_name", deserialize_with = "opt_text")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_date")]
    pub valid_until: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: String,
}

impl Record for Quote {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "number" => FieldValue::from_opt_text(self.number.as_deref()),
            "client" => FieldValue::from_opt_text(self.client.as_deref()),
            "date" => FieldValue::from_opt_date(self.date),
            "valid_until" => FieldValue::from_opt_date(self.valid_until),
            "total" => FieldValue::from_opt_number(self.total),
            "status" => FieldValue::from_opt_text(Some(self.status.as_str())),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "number", "client", "date", "valid_until", "total", "status"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["number", "client"]
    }

    fn date_field() -> Option<&'static str> {
        Some("date")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("date", SortDirection::Descending)
    }
}

impl Workflow for Quote {
    fn status(&self) -> &str {
        &self.status
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Accept | Action::Reject => self.status == "sent",
            Action::Convert => self.status == "accepted",
            _ => false,
        }
    }
}

impl Endpoint for Quote {
    const PATH: &'static str = "/sales/quotes/";
    const EXPORT_PREFIX: &'static str = "quotes";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub number: Option<String>,
    #[serde(default, alias = "client_name", deserialize_with = "opt_text")]
    pub client: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: String,
}

impl Record for SalesOrder {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "number" => FieldValue::from_opt_text(self.number.as_deref()),
            "client" => FieldValue::from_opt_text(self.client.as_deref()),
            "order_date" => FieldValue::from_opt_date(self.order_date),
            "total" => FieldValue::from_opt_number(self.total),
            "status" => FieldValue::from_opt_text(Some(self.status.as_str())),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "number", "client", "order_date", "total", "status"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["number", "client"]
    }

    fn date_field() -> Option<&'static str> {
        Some("order_date")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("order_date", SortDirection::Descending)
    }
}

impl Workflow for SalesOrder {
    fn status(&self) -> &str {
        &self.status
    }

    fn allows(&self, action: Action) -> bool {
        match action {
            Action::Confirm => self.status == "pending",
            Action::Cancel => matches!(self.status.as_str(), "pending" | "confirmed"),
            _ => false,
        }
    }
}

impl Endpoint for SalesOrder {
    const PATH: &'static str = "/sales/orders/";
    const EXPORT_PREFIX: &'static str = "sales_orders";
}
