// ABOUTME: Page/limit query parsing with clamping for list endpoints
// ABOUTME: Provides the shared paged-response math (total pages, has_more)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RecipeShare contributors

//! Offset pagination shared by the recipe and comment list endpoints

use crate::constants::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

/// Raw pagination query parameters as received from the client
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size, clamped to [`MAX_PAGE_SIZE`]
    pub limit: Option<u32>,
}

/// Normalized pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page number, at least 1
    pub page: u32,
    /// Page size in 1..=[`MAX_PAGE_SIZE`]
    pub limit: u32,
}

impl PageWindow {
    /// Normalize client-supplied paging values
    ///
    /// Zero or missing values fall back to page 1 with the default size;
    /// oversized limits clamp to [`MAX_PAGE_SIZE`].
    #[must_use]
    pub fn from_query(query: PageQuery) -> Self {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        Self { page, limit }
    }

    /// Row offset for SQL queries
    ///
    /// Saturates rather than overflowing when the client sends an
    /// absurdly large page number.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Total page count for a result set of `total` rows
    #[must_use]
    pub const fn pages(&self, total: u32) -> u32 {
        total.div_ceil(self.limit)
    }

    /// Whether rows remain past this window
    #[must_use]
    pub const fn has_more(&self, total: u32) -> bool {
        (total as u64) > (self.page as u64) * (self.limit as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let window = PageWindow::from_query(PageQuery::default());
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_limit_clamps_to_max() {
        let window = PageWindow::from_query(PageQuery {
            page: Some(2),
            limit: Some(500),
        });
        assert_eq!(window.limit, MAX_PAGE_SIZE);
        assert_eq!(window.offset(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_zero_page_falls_back_to_first() {
        let window = PageWindow::from_query(PageQuery {
            page: Some(0),
            limit: Some(0),
        });
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, 1);
    }

    #[test]
    fn test_huge_page_saturates_instead_of_overflowing() {
        let window = PageWindow::from_query(PageQuery {
            page: Some(u32::MAX),
            limit: Some(50),
        });
        assert_eq!(window.offset(), u32::MAX);
        assert!(!window.has_more(1_000));
    }

    #[test]
    fn test_pages_and_has_more() {
        let window = PageWindow::from_query(PageQuery {
            page: Some(1),
            limit: Some(20),
        });
        assert_eq!(window.pages(45), 3);
        assert!(window.has_more(45));
        assert!(!window.has_more(20));
    }
}
