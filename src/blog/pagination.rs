//! Offset/limit pagination.

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Create a page request. Zero values are raised to 1.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Number of items to skip.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.per_page as i64
    }

    /// Maximum number of items to return.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// One page of results plus the total count across all pages.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl<T> Paginated<T> {
    /// Build a page from a request.
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }

    /// Number of the last page (at least 1).
    pub fn last_page(&self) -> u32 {
        let total = self.total.max(0) as u64;
        let per_page = self.per_page as u64;
        (total.div_ceil(per_page)).max(1) as u32
    }

    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.page < self.last_page()
    }

    /// Transform the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}
