//! Purchase orders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erpdesk_core::de::{opt_date, opt_number, opt_text};
use erpdesk_core::{FieldValue, Record, RecordId, SortDirection};

use crate::action::{Action, Workflow};
use crate::resource::Endpoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub number: Option<String>,
    #[serde(default, alias = "supplier_name", deserialize_with = "opt_text")]
    pub supplier: Option<String>,
    #[serde(default, deserialize_with = "opt_date")]
    pub order_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_date")]
    pub expected_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "opt_number")]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: String,
}

impl Record for PurchaseOrder {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "number" => FieldValue::from_opt_text(self.number.as_deref()),
            "supplier" => FieldValue::from_opt_text(self.supplier.as_deref()),
            "order_date" => FieldValue::from_opt_date(self.order_date),
            "expected_date" => FieldValue::from_opt_date(self.expected_date),
            "total" => FieldValue::from_opt_number(self.total),
            "status" => FieldValue::from_opt_text(Some(self.status.as_str())),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &["id", "number", "supplier", "order_date", "expected_date", "total", "status"]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["number", "supplier"]
    }

    fn date_field() -> Option<&'static str> {
        Some("order_date")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("order_date", SortDirection::Descending)
    }
}

impl Workflow for PurchaseOrder {
    fn status(&self) -> &str {
        &self.status
    }

    fn allows(&self, action: Action) -> bool {
        action == Action::Receive && self.status == "ordered"
    }
}

impl Endpoint for PurchaseOrder {
    const PATH: &'static str = "/purchasing/orders/";
    const EXPORT_PREFIX: &'static str = "purchase_orders";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_ordered_purchase_orders_can_be_received() {
        for (status, expected) in [("draft", false), ("ordered", true), ("received", false)] {
            let po: PurchaseOrder =
                serde_json::from_value(json!({"id": 3, "status": status})).unwrap();
            assert_eq!(po.allows(Action::Receive), expected, "{status}");
            assert!(!po.allows(Action::Cancel));
        }
    }

    #[test]
    fn supplier_name_alias_is_accepted() {
        let po: PurchaseOrder = serde_json::from_value(json!({
            "id": 3,
            "supplier_name": "Steel & Co",
            "expected_date": "2024-09-10T08:00:00Z",
            "total": 99.5,
        }))
        .unwrap();
        assert_eq!(po.field("supplier"), FieldValue::text("Steel & Co"));
        assert_eq!(po.expected_date, NaiveDate::from_ymd_opt(2024, 9, 10));
        assert_eq!(po.field("total"), FieldValue::Number(99.5));
    }
}
