//! A mounted collection view with debounced free-text search.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use erpdesk_core::Record;

use crate::config::ViewConfig;
use crate::debounce::Debouncer;
use crate::error::CollectionError;
use crate::filter::FilterPatch;
use crate::sort::SortState;
use crate::view::CollectionView;

/// Owns the view state for as long as the table is on screen.
///
/// Pending query updates only hold a weak reference, so once the `LiveView`
/// is unmounted (or dropped) nothing writes to the state again.
pub struct LiveView<R> {
    view: Arc<Mutex<CollectionView<R>>>,
    debouncer: Debouncer,
}

impl<R> LiveView<R>
where
    R: Record + Send + 'static,
{
    pub fn mount(records: Vec<R>, config: &ViewConfig) -> Self {
        Self::from_view(CollectionView::with_config(records, config), config.debounce)
    }

    pub fn from_view(view: CollectionView<R>, debounce: Duration) -> Self {
        debug!(records = view.records().len(), "view mounted");
        Self {
            view: Arc::new(Mutex::new(view)),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Schedule `text` as the free-text query. A later call within the quiet
    /// period replaces it.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        let target = Arc::downgrade(&self.view);
        self.debouncer.schedule(async move {
            let Some(view) = target.upgrade() else {
                trace!("view gone before query applied");
                return;
            };
            view.lock().await.apply_query(&text);
        });
    }

    /// Categorical and date fields apply now; the query part is debounced.
    ///
    /// An invalid date rejects the whole patch, query included.
    pub async fn set_filter(&mut self, mut patch: FilterPatch) -> Result<(), CollectionError> {
        let query = patch.take_query();
        if !patch.is_empty() {
            self.view.lock().await.set_filter(patch)?;
        }
        if let Some(text) = query {
            self.set_query(text);
        }
        Ok(())
    }

    /// Drops any pending query as well.
    pub async fn clear_filters(&mut self) {
        self.debouncer.cancel();
        self.view.lock().await.clear_filters();
    }

    pub async fn set_sort(&self, sort: SortState) {
        self.view.lock().await.set_sort(sort);
    }

    pub async fn toggle_sort(&self, field: &str) {
        self.view.lock().await.toggle_sort(field);
    }

    pub async fn set_page(&self, page: usize) {
        self.view.lock().await.set_page(page);
    }

    pub async fn replace_records(&self, records: Vec<R>) {
        self.view.lock().await.replace_records(records);
    }

    /// Read the current state, e.g. to render `derive()` or export.
    pub async fn with_view<T>(&self, f: impl FnOnce(&CollectionView<R>) -> T) -> T {
        let guard = self.view.lock().await;
        f(&guard)
    }

    pub fn has_pending_query(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Tear down: pending updates are abandoned and the state is discarded.
    pub fn unmount(mut self) {
        self.debouncer.cancel();
        debug!("view unmounted");
    }
}
