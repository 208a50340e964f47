//! Paging contract shared by the repository and search layers.

use serde::{Deserialize, Serialize};

/// Default page size when the client does not supply one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on page size to keep list responses bounded.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// A 0-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Build a page request, clamping the size into `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Offset of the first item on this page.
    pub fn offset(&self) -> usize {
        self.page as usize * self.size as usize
    }

    /// Slice a full, ordered result set down to this page.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(self.size as usize)
            .cloned()
            .collect()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    /// Index of the last page for the given request (0 when empty).
    ///
    /// The fields of `PageRequest` are public, so a literal with `size: 0`
    /// can sidestep the clamp in `new`; treat it as size 1 rather than divide
    /// by zero.
    pub fn last_page(&self, request: &PageRequest) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        ((self.total_count - 1) / (request.size.max(1)) as u64) as u32
    }
}

impl<T: Clone> Page<T> {
    /// Paginate an already ordered, fully materialized result set.
    pub fn from_slice(items: &[T], request: &PageRequest) -> Self {
        Self {
            items: request.slice(items),
            total_count: items.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0).size, 1);
        assert_eq!(PageRequest::new(0, 10_000).size, MAX_PAGE_SIZE);
    }

    #[test]
    fn slicing_respects_page_and_size() {
        let items: Vec<i32> = (0..25).collect();
        let page = Page::from_slice(&items, &PageRequest::new(1, 10));
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
    }

    #[test]
    fn out_of_range_page_is_empty_with_correct_total() {
        let items: Vec<i32> = (0..5).collect();
        let page = Page::from_slice(&items, &PageRequest::new(3, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 5);
    }

    #[test]
    fn last_page_index() {
        let request = PageRequest::new(0, 10);
        assert_eq!(Page::<i32>::new(vec![], 0).last_page(&request), 0);
        assert_eq!(Page::<i32>::new(vec![], 10).last_page(&request), 0);
        assert_eq!(Page::<i32>::new(vec![], 11).last_page(&request), 1);
        assert_eq!(Page::<i32>::new(vec![], 25).last_page(&request), 2);
    }

    #[test]
    fn last_page_tolerates_a_literal_zero_size() {
        // Built without `new`, so the clamp never ran.
        let request = PageRequest { page: 0, size: 0 };
        assert_eq!(Page::<i32>::new(vec![], 5).last_page(&request), 4);
    }
}
