//! `erpdesk-records`: ERP record types and their REST resources.
//!
//! Every record implements [`erpdesk_core::Record`] so it can be shown in a
//! collection view, and [`Endpoint`] so a [`Resource`] knows where it lives.
//! Status-driven records also implement [`Workflow`], which decides which
//! backend actions the UI may offer.

pub mod action;
pub mod error;
pub mod inventory;
pub mod parties;
pub mod purchasing;
pub mod resource;
pub mod sales;

pub use action::{Action, Workflow};
pub use error::RecordError;
pub use inventory::StockItem;
pub use parties::{Client, Supplier};
pub use purchasing::PurchaseOrder;
pub use resource::{Endpoint, Resource};
pub use sales::{Invoice, Quote, SalesOrder};
