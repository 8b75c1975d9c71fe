//! Page envelope for list responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Pagination {
    /// One-based page number.
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Cut page `page` out of the full, already ordered `items`.
    ///
    /// `page` and `page_size` are clamped to at least 1. A page past the end
    /// is empty but still reports the totals.
    #[must_use]
    pub fn from_items(items: Vec<T>, page: u32, page_size: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total_pages = total.div_ceil(page_size);

        let skip = (page - 1).saturating_mul(page_size) as usize;
        let data = items
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        Self {
            data,
            pagination: Pagination {
                page,
                page_size,
                total,
                total_pages,
            },
        }
    }
}
