//! `erpdesk-core`: shared client-side building blocks.
//!
//! This crate contains **pure** primitives (no network, no timers): record
//! identity, field values and the `Record` trait every collection implements.

pub mod de;
pub mod error;
pub mod id;
pub mod record;
pub mod value;

pub use error::{CoreError, CoreResult};
pub use id::RecordId;
pub use record::{Record, SortDirection};
pub use value::FieldValue;
