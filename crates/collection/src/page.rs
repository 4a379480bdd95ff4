//! Page state and pagination helpers.

use serde::Serialize;

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    /// Page 1 with the given size (at least 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Unclamped; clamping happens against a filtered count.
    pub fn at(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to `page`, clamped to the pages `filtered_count` rows produce.
    pub fn set(&mut self, page: usize, filtered_count: usize) {
        self.page = clamp_page(page, total_pages(filtered_count, self.page_size));
    }

    /// Row range `[start, end)` of the clamped page.
    pub fn bounds(&self, filtered_count: usize) -> (usize, usize, usize) {
        let page = clamp_page(self.page, total_pages(filtered_count, self.page_size));
        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(filtered_count);
        (page, start.min(filtered_count), end)
    }
}

/// `max(1, ceil(count / page_size))`.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Page numbers for pagination controls; `None` marks an elided gap.
///
/// Always shows the first and last `edge` pages and `around` pages on each
/// side of `current`.
pub fn page_links(total_pages: usize, current: usize, edge: usize, around: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total_pages);

    let mut links = Vec::new();
    let mut last_shown = 0;
    for page in 1..=total_pages {
        let near_edge = page <= edge || page > total_pages.saturating_sub(edge);
        let near_current = page + around >= current && page <= current + around;
        if near_edge || near_current {
            if last_shown + 1 < page {
                links.push(None);
            }
            links.push(Some(page));
            last_shown = page;
        }
    }
    links
}
