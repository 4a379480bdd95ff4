//! Collection view: state plus the pure `derive` pipeline.
//!
//! `derive` is recomputed from scratch on every read. It never mutates the
//! collection and never touches the network.

use chrono::{Local, NaiveDate};
use tracing::debug;

use erpdesk_core::Record;

use crate::config::ViewConfig;
use crate::error::{CollectionError, ExportError};
use crate::export::{ExportArtifact, to_csv};
use crate::filter::{FilterPatch, FilterState};
use crate::page::{PageState, page_links, total_pages};
use crate::sort::SortState;

/// Pages always shown at either end of the pagination controls.
const LINK_EDGE: usize = 1;
/// Pages shown on each side of the current page.
const LINK_AROUND: usize = 2;

/// Output of [`derive`].
#[derive(Debug, Clone, PartialEq)]
pub struct Derived<'a, R> {
    pub visible: Vec<&'a R>,
    pub filtered_count: usize,
    pub total_pages: usize,
    /// Clamped page the slice was taken from.
    pub page: usize,
}

/// Filtered rows in sort order.
fn filtered_sorted<'a, R: Record>(records: &'a [R], filter: &FilterState, sort: &SortState) -> Vec<&'a R> {
    let mut rows: Vec<&'a R> = records.iter().filter(|r| filter.matches(*r)).collect();
    sort.sort(&mut rows);
    rows
}

/// Filter, sort, then slice one page.
pub fn derive<'a, R: Record>(
    records: &'a [R],
    filter: &FilterState,
    sort: &SortState,
    page: PageState,
) -> Derived<'a, R> {
    let mut rows = filtered_sorted(records, filter, sort);
    let filtered_count = rows.len();
    let (current, start, end) = page.bounds(filtered_count);

    rows.truncate(end);
    rows.drain(..start);

    Derived {
        visible: rows,
        filtered_count,
        total_pages: total_pages(filtered_count, page.page_size()),
        page: current,
    }
}

/// A mounted table over an in-memory collection.
#[derive(Debug, Clone)]
pub struct CollectionView<R> {
    records: Vec<R>,
    filter: FilterState,
    sort: SortState,
    page: PageState,
}

impl<R: Record> CollectionView<R> {
    /// Default filter, the record type's default sort, page 1.
    pub fn new(records: Vec<R>, page_size: usize) -> Self {
        Self {
            records,
            filter: FilterState::default(),
            sort: SortState::default_for::<R>(),
            page: PageState::new(page_size),
        }
    }

    pub fn with_config(records: Vec<R>, config: &ViewConfig) -> Self {
        Self::new(records, config.page_size)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    /// Merge `patch` and go back to page 1.
    ///
    /// On an invalid date the whole view, page included, is left as it was.
    pub fn set_filter(&mut self, patch: FilterPatch) -> Result<(), CollectionError> {
        self.filter.apply(patch)?;
        self.page.reset();
        debug!(filter = ?self.filter, "filter updated");
        Ok(())
    }

    /// Apply a free-text query. Callers debounce this; see `LiveView`.
    pub fn apply_query(&mut self, text: &str) {
        self.filter.set_query(text);
        self.page.reset();
        debug!(query = ?self.filter.query(), "query applied");
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.page.reset();
    }

    pub fn set_sort(&mut self, sort: SortState) {
        debug!(field = %sort.field, direction = sort.direction.as_str(), "sort updated");
        self.sort = sort;
        self.page.reset();
    }

    /// Column header click.
    pub fn toggle_sort(&mut self, field: &str) {
        let next = self.sort.toggled(field);
        self.set_sort(next);
    }

    /// Move to page `n`, clamped to the current filtered range.
    pub fn set_page(&mut self, n: usize) {
        let count = self.filtered_count();
        self.page.set(n, count);
    }

    /// Swap in a freshly fetched collection. Filter and sort survive; the
    /// page is re-clamped.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.records = records;
        let count = self.filtered_count();
        self.page.set(self.page.page(), count);
        debug!(total = self.records.len(), filtered = count, "records replaced");
    }

    pub fn derive(&self) -> Derived<'_, R> {
        derive(&self.records, &self.filter, &self.sort, self.page)
    }

    pub fn filtered_count(&self) -> usize {
        self.records.iter().filter(|r| self.filter.matches(*r)).count()
    }

    pub fn page_links(&self) -> Vec<Option<usize>> {
        let derived = self.derive();
        page_links(derived.total_pages, derived.page, LINK_EDGE, LINK_AROUND)
    }

    /// CSV of the rows on the current page.
    pub fn export_current_page(&self, prefix: &str) -> Result<ExportArtifact, ExportError> {
        self.export_current_page_on(prefix, Local::now().date_naive())
    }

    /// CSV of every filtered row, in sort order, ignoring pagination.
    pub fn export_all_filtered(&self, prefix: &str) -> Result<ExportArtifact, ExportError> {
        self.export_all_filtered_on(prefix, Local::now().date_naive())
    }

    pub fn export_current_page_on(&self, prefix: &str, stamp: NaiveDate) -> Result<ExportArtifact, ExportError> {
        let derived = self.derive();
        let content = to_csv(&derived.visible)?;
        Ok(ExportArtifact::csv(prefix, stamp, content))
    }

    pub fn export_all_filtered_on(&self, prefix: &str, stamp: NaiveDate) -> Result<ExportArtifact, ExportError> {
        let rows = filtered_sorted(&self.records, &self.filter, &self.sort);
        let content = to_csv(&rows)?;
        Ok(ExportArtifact::csv(prefix, stamp, content))
    }
}
