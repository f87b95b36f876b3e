//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

/// Fixed page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 20;

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Row offset for the current page
    pub fn offset(&self) -> u64 {
        let page = self.page.max(1);
        u64::from(page - 1) * u64::from(self.per_page)
    }

    /// Number of pages needed for `total_items` rows
    pub fn total_pages(&self, total_items: u64) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        total_items.div_ceil(u64::from(self.per_page)) as u32
    }
}

/// Paginated response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub per_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl PaginationMeta {
    pub fn new(pagination: &Pagination, total_items: u64) -> Self {
        Self {
            page: pagination.page.max(1),
            per_page: pagination.per_page,
            total_items,
            total_pages: pagination.total_pages(total_items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_first_page() {
        let p = Pagination::default();
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_offset_later_page() {
        let p = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(p.offset(), 40);
    }

    #[test]
    fn test_offset_zero_page_clamped() {
        let p = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_total_pages_exact_and_partial() {
        let p = Pagination {
            page: 1,
            per_page: 20,
        };
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(40), 2);
        assert_eq!(p.total_pages(41), 3);
    }
}
