//! Page slicing and page-count metadata.
//!
//! Out-of-range pages are not an error: they produce an empty slice while
//! still reporting the requested page number back to the caller.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Page metadata returned alongside a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_size: usize,
    /// Number of items after filtering, before slicing.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; zero for an empty collection.
    pub total_pages: usize,
    /// The requested page, echoed verbatim even when past the last page.
    pub current_page: usize,
}

impl Pagination {
    /// Computes metadata for `total_items` items split into pages of `page_size`.
    pub fn new(total_items: usize, page: usize, page_size: NonZeroUsize) -> Self {
        Pagination {
            page_size: page_size.get(),
            total_items,
            total_pages: total_items.div_ceil(page_size.get()),
            current_page: page,
        }
    }

    /// Returns `true` if the current page holds at least one item.
    pub fn is_in_range(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slices `items` into page number `page` (zero-based).
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use appdir_seeker::paginate;
///
/// let items = ["#0", "#1", "#2", "#3", "#4"];
/// let size = NonZeroUsize::new(2).unwrap();
///
/// let last = paginate(&items, 2, size);
/// assert_eq!(last.items, vec!["#4"]);
/// assert_eq!(last.pagination.total_pages, 3);
///
/// let beyond = paginate(&items, 10, size);
/// assert!(beyond.items.is_empty());
/// assert_eq!(beyond.pagination.current_page, 10);
/// ```
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: NonZeroUsize) -> Page<T> {
    let pagination = Pagination::new(items.len(), page, page_size);
    let items = page_bounds(items.len(), page, page_size)
        .map(|(start, end)| items[start..end].to_vec())
        .unwrap_or_default();

    Page { items, pagination }
}

// Saturating so an absurd page number cannot overflow.
fn page_bounds(len: usize, page: usize, page_size: NonZeroUsize) -> Option<(usize, usize)> {
    let start = page.saturating_mul(page_size.get());
    if start >= len {
        return None;
    }
    let end = start.saturating_add(page_size.get()).min(len);
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn five() -> Vec<&'static str> {
        vec!["#0", "#1", "#2", "#3", "#4"]
    }

    #[test]
    fn first_page() {
        let page = paginate(&five(), 0, size(2));
        assert_eq!(page.items, vec!["#0", "#1"]);
        assert_eq!(
            page.pagination,
            Pagination {
                page_size: 2,
                total_items: 5,
                total_pages: 3,
                current_page: 0,
            }
        );
    }

    #[test]
    fn last_partial_page() {
        let page = paginate(&five(), 2, size(2));
        assert_eq!(page.items, vec!["#4"]);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, 2);
    }

    #[test]
    fn out_of_range_page_is_empty() {
        let page = paginate(&five(), 10, size(2));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_items, 5);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.pagination.current_page, 10);
        assert!(!page.pagination.is_in_range());
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = paginate(&five(), usize::MAX, size(2));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.current_page, usize::MAX);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let page = paginate::<u8>(&[], 0, size(3));
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn exact_multiple() {
        let items: Vec<u32> = (0..6).collect();
        let page = paginate(&items, 1, size(3));
        assert_eq!(page.items, vec![3, 4, 5]);
        assert_eq!(page.pagination.total_pages, 2);
    }

    #[test]
    fn serializes_camel_case() {
        let pagination = Pagination::new(5, 0, size(2));
        let json = serde_json::to_value(pagination).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageSize": 2,
                "totalItems": 5,
                "totalPages": 3,
                "currentPage": 0
            })
        );
    }
}
