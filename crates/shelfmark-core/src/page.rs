//! Fixed-size pagination over an ordered result set.

use serde::Serialize;

/// Items per page. The listing UI renders exactly this many rows.
pub const PAGE_SIZE: usize = 10;

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed effective page (after clamping).
    pub current_page: usize,
    pub total_pages: usize,
}

/// Slice an ordered set into the requested page.
///
/// Pages are 1-indexed. A missing, zero, or out-of-range page number clamps
/// back to page 1 — a fallback-to-start policy, never an error and never
/// the last page. Zero items yields zero total pages and an empty slice.
pub fn paginate<T: Clone>(items: &[T], requested: Option<usize>) -> Page<T> {
    let total_pages = items.len().div_ceil(PAGE_SIZE);

    let current_page = match requested {
        Some(page) if page >= 1 && page <= total_pages => page,
        _ => 1,
    };

    let start = (current_page - 1) * PAGE_SIZE;
    let page_items = items
        .iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    Page {
        items: page_items,
        current_page,
        total_pages,
    }
}
