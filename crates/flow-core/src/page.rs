//! Pagination envelopes.
//!
//! Every list read returns a [`PageResult`]: an ordered slice plus the
//! [`PageInfo`] the UI needs to render pagers. Slicing is only meaningful
//! over an explicitly sorted snapshot; the query engine guarantees that.

use serde::{Deserialize, Serialize};

/// A 1-based page request. Values are clamped to at least 1 on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Build a request from optional caller inputs, falling back to page 1
    /// and the collection's default page size. Zero values are clamped to 1.
    #[must_use]
    pub fn resolve(page: Option<u32>, page_size: Option<u32>, default_size: u32) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).max(1),
        }
    }
}

/// Pagination metadata accompanying a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total: u32,
    pub total_pages: u32,
}

/// One page of an ordered, filtered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> PageResult<T> {
    /// Slice a fully filtered, sorted snapshot into one page.
    ///
    /// `total` is the post-filter count; a page beyond `total_pages` yields
    /// an empty slice, not an error.
    #[must_use]
    pub fn slice(items: Vec<T>, request: PageRequest) -> Self {
        let total = u32::try_from(items.len()).unwrap_or(u32::MAX);
        let total_pages = total.div_ceil(request.page_size);
        let start = (request.page as usize - 1).saturating_mul(request.page_size as usize);
        let data: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(request.page_size as usize)
            .collect();
        Self {
            data,
            pagination: PageInfo {
                page: request.page,
                page_size: request.page_size,
                total,
                total_pages,
            },
        }
    }
}
