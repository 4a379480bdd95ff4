//! Stock levels.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use erpdesk_core::de::{opt_date, opt_number, opt_text};
use erpdesk_core::{FieldValue, Record, RecordId, SortDirection};

use crate::resource::Endpoint;

pub const LOW: &str = "low";
pub const OK: &str = "ok";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: RecordId,
    #[serde(default, deserialize_with = "opt_text")]
    pub sku: Option<String>,
    #[serde(default, alias = "product_name", deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub warehouse: Option<String>,
    #[serde(default, deserialize_with = "opt_number")]
    pub quantity: Option<f64>,
    #[serde(default, deserialize_with = "opt_number")]
    pub reorder_level: Option<f64>,
    #[serde(default, deserialize_with = "opt_date")]
    pub updated_at: Option<NaiveDate>,
}

impl StockItem {
    /// At or below the reorder level. Items without a level are never low.
    pub fn is_low(&self) -> bool {
        match (self.quantity, self.reorder_level) {
            (Some(qty), Some(level)) => qty <= level,
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

impl Record for StockItem {
    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> FieldValue {
        match name {
            "id" => self.id.field_value(),
            "sku" => FieldValue::from_opt_text(self.sku.as_deref()),
            "name" => FieldValue::from_opt_text(self.name.as_deref()),
            "warehouse" => FieldValue::from_opt_text(self.warehouse.as_deref()),
            "quantity" => FieldValue::from_opt_number(self.quantity),
            "reorder_level" => FieldValue::from_opt_number(self.reorder_level),
            "stock_status" => FieldValue::text(if self.is_low() { LOW } else { OK }),
            "updated_at" => FieldValue::from_opt_date(self.updated_at),
            _ => FieldValue::Empty,
        }
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "sku",
            "name",
            "warehouse",
            "quantity",
            "reorder_level",
            "stock_status",
            "updated_at",
        ]
    }

    fn searchable_fields() -> &'static [&'static str] {
        &["sku", "name", "warehouse"]
    }

    fn date_field() -> Option<&'static str> {
        Some("updated_at")
    }

    fn default_sort() -> (&'static str, SortDirection) {
        ("name", SortDirection::Ascending)
    }
}

impl Endpoint for StockItem {
    const PATH: &'static str = "/inventory/stock/";
    const EXPORT_PREFIX: &'static str = "stock";
}
