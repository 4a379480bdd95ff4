//! Command-line arguments.
//!
//! ```text
//! erpdesk <collection> [--query TEXT] [--filter FIELD=VALUE]... [--from DATE]
//!         [--to DATE] [--sort FIELD[:asc|:desc]] [--page N]
//!         [--export page|all] [--out DIR]
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use erpdesk_collection::{FilterPatch, SortState};
use erpdesk_core::SortDirection;

/// Collections the shell can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Invoices,
    Quotes,
    #[value(alias = "orders")]
    SalesOrders,
    PurchaseOrders,
    Clients,
    Suppliers,
    Stock,
}

/// Which rows `--export` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportScope {
    /// The page being shown.
    Page,
    /// Every row matching the filters.
    All,
}

/// List one ERP collection, filtered, sorted and paged.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "erpdesk", version)]
pub struct CliArgs {
    #[arg(value_enum)]
    pub collection: Collection,

    /// Free-text search across the collection's searchable fields.
    #[arg(short, long)]
    pub query: Option<String>,

    /// Exact match on a categorical field, e.g. `status=draft`.
    #[arg(short, long = "filter", value_name = "FIELD=VALUE", value_parser = parse_category)]
    pub filters: Vec<(String, String)>,

    /// Earliest date, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,

    #[arg(short, long, value_name = "FIELD[:asc|:desc]", value_parser = parse_sort)]
    pub sort: Option<SortState>,

    #[arg(short, long)]
    pub page: Option<usize>,

    #[arg(long, value_enum)]
    pub export: Option<ExportScope>,

    /// Directory the CSV export is written to.
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,
}

impl CliArgs {
    /// The filter flags as one patch for the collection view.
    pub fn filter(&self) -> FilterPatch {
        let mut patch = FilterPatch::default();
        for (field, value) in &self.filters {
            patch = patch.category(field.as_str(), value.as_str());
        }
        if let Some(query) = &self.query {
            patch = patch.query(query.as_str());
        }
        if let Some(from) = &self.from {
            patch = patch.date_from(from.as_str());
        }
        if let Some(to) = &self.to {
            patch = patch.date_to(to.as_str());
        }
        patch
    }
}

fn parse_category(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok((field.to_string(), value.to_string())),
        _ => Err(format!("expected FIELD=VALUE, got {raw:?}")),
    }
}

fn parse_sort(raw: &str) -> Result<SortState, String> {
    let (field, direction) = match raw.split_once(':') {
        Some((field, "asc")) => (field, SortDirection::Ascending),
        Some((field, "desc")) => (field, SortDirection::Descending),
        Some((_, other)) => return Err(format!("unknown direction {other:?}, use asc or desc")),
        None => (raw, SortDirection::Ascending),
    };
    if field.is_empty() {
        return Err("missing sort field".to_string());
    }
    Ok(SortState::new(field, direction))
}
