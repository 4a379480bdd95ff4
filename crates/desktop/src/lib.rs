//! `erpdesk-desktop`
//!
//! **Responsibility:** thin command-line shell over the ERP API.
//!
//! It restores (or opens) a session, fetches one collection, runs it through
//! a collection view, prints the current page and optionally exports CSV.
//! All business rules stay on the backend.

pub mod app;
pub mod args;
pub mod render;

pub use app::{Outcome, run};
pub use args::{CliArgs, Collection, ExportScope};
