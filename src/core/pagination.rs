//! Page arithmetic for the customer and order listings.

use serde::Serialize;

/// A 1-based page request with a fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested page, never below 1
    pub page: u64,
    /// Rows per page, never zero
    pub per_page: u64,
}

impl PageRequest {
    /// Builds a request, clamping page to at least 1 and page size to at least 1.
    #[must_use]
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Builds a request from an optional raw `?page=` value.
    ///
    /// Missing or unparsable values mean the first page.
    #[must_use]
    pub fn from_query(page: Option<&str>, per_page: u64) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<u64>().ok())
            .unwrap_or(1);
        Self::new(page, per_page)
    }

    /// Rows to skip before this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }
}

/// Pagination block returned alongside every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Matching rows across all pages
    pub total: u64,
    /// Number of pages, `ceil(total / per_page)`
    pub page_count: u64,
    /// Page that was served
    pub current_page: u64,
    /// Rows per page
    pub per_page: u64,
}

impl Pagination {
    /// Describes `request` within a result set of `total` rows.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            total,
            page_count: total.div_ceil(request.per_page),
            current_page: request.page,
            per_page: request.per_page,
        }
    }
}

/// One page of rows plus its pagination block.
#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,
    /// Position of this page in the full result
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults_and_clamps() {
        assert_eq!(PageRequest::from_query(None, 10).page, 1);
        assert_eq!(PageRequest::from_query(Some("abc"), 10).page, 1);
        assert_eq!(PageRequest::from_query(Some("0"), 10).page, 1);
        assert_eq!(PageRequest::from_query(Some("3"), 10).page, 3);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_page_count_rounds_up() {
        let request = PageRequest::new(1, 10);
        assert_eq!(Pagination::new(request, 0).page_count, 0);
        assert_eq!(Pagination::new(request, 10).page_count, 1);
        assert_eq!(Pagination::new(request, 11).page_count, 2);
    }
}
