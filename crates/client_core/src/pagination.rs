//! Client-side pagination over a fully fetched list.
//!
//! Pages are 1-based. Selecting a page past the end is not clamped: it simply
//! yields an empty slice.

use std::{
    num::NonZeroUsize,
    ops::{Range, RangeInclusive},
};

/// Rows shown per page in the customer table.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    current_page: usize,
    page_size: usize,
    total_items: usize,
}

impl PageWindow {
    /// Returns `None` when `current_page` or `page_size` is zero.
    pub fn new(current_page: usize, page_size: usize, total_items: usize) -> Option<Self> {
        if current_page == 0 || page_size == 0 {
            return None;
        }
        Some(Self {
            current_page,
            page_size,
            total_items,
        })
    }

    /// First page of a `PAGE_SIZE` window.
    pub fn first(total_items: usize) -> Self {
        Self::at(NonZeroUsize::MIN, total_items)
    }

    /// `page` of a `PAGE_SIZE` window.
    pub fn at(page: NonZeroUsize, total_items: usize) -> Self {
        Self {
            current_page: page.get(),
            page_size: PAGE_SIZE,
            total_items,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Index range of the current page, clipped to `total_items`.
    pub fn visible_range(&self) -> Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.page_size);
        let end = self.current_page.saturating_mul(self.page_size);
        start.min(self.total_items)..end.min(self.total_items)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let end = range.end.min(items.len());
        let start = range.start.min(end);
        &items[start..end]
    }

    /// Page numbers for the selector controls. Empty when there are no items.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages()
    }

    pub fn is_current(&self, page: usize) -> bool {
        self.current_page == page
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
