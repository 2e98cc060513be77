//! Paginator.
//!
//! Pages are 1-based. A page number outside `[1, total_pages]` is clamped,
//! and an empty result still has a page 1 (showing nothing).

use std::fmt;

use serde::Serialize;

/// Items per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Number of pages needed for `total` items. Zero items need zero pages.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// One page of a filtered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    /// The page actually shown after clamping.
    pub page: usize,
    pub total_pages: usize,
}

/// Cut page `page` out of `filtered`.
pub fn paginate<T>(filtered: &[T], page: usize, page_size: usize) -> PageSlice<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let page = page.clamp(1, total_pages.max(1));

    let start = ((page - 1) * page_size).min(filtered.len());
    let end = (page * page_size).min(filtered.len());

    PageSlice {
        items: &filtered[start..end],
        page,
        total_pages,
    }
}

/// The 1-based positions shown on a page, for the count summary.
///
/// With nothing to show the range is degenerate: start 1, end 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayRange {
    pub start: usize,
    pub end: usize,
    pub total: usize,
}

impl DisplayRange {
    /// The status line shown above the grid.
    pub fn summary(&self) -> String {
        format!("Showing {self} Cards")
    }
}

impl fmt::Display for DisplayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} of {}", self.start, self.end, self.total)
    }
}

pub fn displayed_range(page: usize, page_size: usize, total: usize) -> DisplayRange {
    let page = page.max(1);
    DisplayRange {
        start: (page - 1) * page_size + 1,
        end: (page * page_size).min(total),
        total,
    }
}

/// State of the previous/next buttons and the page indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationControls {
    pub page: usize,
    pub total_pages: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationControls {
    pub fn new(page: usize, total_pages: usize) -> Self {
        Self {
            page,
            total_pages,
            previous_enabled: page > 1,
            next_enabled: page < total_pages,
        }
    }

    /// `Page {page} of {total_pages}`.
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
