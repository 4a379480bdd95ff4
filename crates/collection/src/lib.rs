//! `erpdesk-collection`: client-side table logic.
//!
//! Turns an in-memory record collection plus filter / sort / page state into
//! the slice of rows to render, and exports either that slice or the whole
//! filtered set as CSV. Nothing here touches the network.
//!
//! - [`CollectionView`]: synchronous state + pure [`derive`]
//! - [`LiveView`]: a mounted view with debounced free-text search
//! - [`Debouncer`]: cancellable delayed task used by `LiveView`

pub mod config;
pub mod debounce;
pub mod error;
pub mod export;
pub mod filter;
pub mod live;
pub mod page;
pub mod sort;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::ViewConfig;
pub use debounce::Debouncer;
pub use error::{CollectionError, ExportError};
pub use export::ExportArtifact;
pub use filter::{FilterPatch, FilterState};
pub use live::LiveView;
pub use page::PageState;
pub use sort::SortState;
pub use view::{CollectionView, Derived, derive};
