//! Pagination metadata returned via response headers.
//!
//! List endpoints return the page body as a bare JSON array; the total count
//! travels in `x-total-count` and page navigation in a `Link` header with
//! first/prev/next/last relations.

use axum::http::{header::LINK, HeaderMap, HeaderName, HeaderValue};

use crate::db::page::{Page, PageRequest};

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

fn link_entry(base_path: &str, page: u32, size: u32, rel: &str) -> String {
    format!("<{}?page={}&size={}>; rel=\"{}\"", base_path, page, size, rel)
}

/// Build `x-total-count` and `Link` headers for a page of results.
pub fn pagination_headers<T>(base_path: &str, request: &PageRequest, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(&page.total_count.to_string()) {
        headers.insert(HeaderName::from_static(TOTAL_COUNT_HEADER), value);
    }

    let last = page.last_page(request);
    let mut links = Vec::new();
    if request.page + 1 <= last {
        links.push(link_entry(base_path, request.page + 1, request.size, "next"));
    }
    if request.page > 0 {
        links.push(link_entry(
            base_path,
            request.page.min(last + 1) - 1,
            request.size,
            "prev",
        ));
    }
    links.push(link_entry(base_path, last, request.size, "last"));
    links.push(link_entry(base_path, 0, request.size, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(LINK, value);
    }

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(total: u64) -> Page<i32> {
        Page::new(vec![], total)
    }

    #[test]
    fn total_count_header_is_set() {
        let headers = pagination_headers("/api/weekdays", &PageRequest::new(0, 10), &page_of(25));
        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "25");
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let headers = pagination_headers("/api/weekdays", &PageRequest::new(0, 10), &page_of(25));
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(link.contains("page=1&size=10>; rel=\"next\""));
        assert!(!link.contains("rel=\"prev\""));
        assert!(link.contains("page=2&size=10>; rel=\"last\""));
        assert!(link.contains("page=0&size=10>; rel=\"first\""));
    }

    #[test]
    fn middle_page_has_both_directions() {
        let headers = pagination_headers("/api/weekdays", &PageRequest::new(1, 10), &page_of(25));
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(link.contains("page=2&size=10>; rel=\"next\""));
        assert!(link.contains("page=0&size=10>; rel=\"prev\""));
    }

    #[test]
    fn last_page_has_no_next() {
        let headers = pagination_headers("/api/weekdays", &PageRequest::new(2, 10), &page_of(25));
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(!link.contains("rel=\"next\""));
        assert!(link.contains("rel=\"prev\""));
    }

    #[test]
    fn empty_result_still_carries_first_and_last() {
        let headers = pagination_headers("/api/weekdays", &PageRequest::new(0, 10), &page_of(0));
        assert_eq!(headers.get(TOTAL_COUNT_HEADER).unwrap(), "0");
        let link = headers.get(LINK).unwrap().to_str().unwrap();
        assert!(link.contains("rel=\"first\""));
        assert!(link.contains("rel=\"last\""));
    }
}
