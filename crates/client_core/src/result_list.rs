use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::sort::{sort_items, SortFields, SortKey, SortOrder};

pub const DEFAULT_PAGE_SIZE: usize = 9;
pub const DEFAULT_PAGE_WINDOW: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page size must be positive")]
    ZeroPageSize,
}

/// Pages are 1-based and the current page stays in `1..=total_pages()`.
#[derive(Debug, Clone)]
pub struct ResultList<T> {
    items: Vec<T>,
    page_size: usize,
    current_page: usize,
}

#[derive(Debug, Serialize)]
pub struct PageView<'a, T> {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub per_page: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub page_window: Vec<usize>,
    pub items: &'a [T],
}

impl<T> Default for ResultList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
        }
    }
}

impl<T> ResultList<T> {
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self {
            items: Vec::new(),
            page_size,
            current_page: 1,
        })
    }

    pub fn load(&mut self, items: Vec<T>) {
        debug!(count = items.len(), "result set loaded");
        self.items = items;
        self.current_page = 1;
    }

    pub fn load_result<E: Display>(&mut self, result: Result<Vec<T>, E>) {
        match result {
            Ok(items) => self.load(items),
            Err(err) => {
                warn!(error = %err, "fetch failed; clearing result set");
                self.clear();
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: i64) {
        let last = i64::try_from(self.total_pages()).unwrap_or(i64::MAX);
        self.current_page = usize::try_from(page.clamp(1, last)).unwrap_or(1);
    }

    pub fn next_page(&mut self) {
        if self.has_next() {
            self.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous() {
            self.current_page -= 1;
        }
    }

    pub fn current_page_items(&self) -> &[T] {
        let start = (self.current_page - 1) * self.page_size;
        if start >= self.items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    // Slides back near the last page to keep the full width.
    pub fn page_window(&self, max_buttons: usize) -> Vec<usize> {
        if max_buttons == 0 {
            return Vec::new();
        }
        let total = self.total_pages();
        let start = self.current_page.saturating_sub(max_buttons / 2).max(1);
        let end = total.min(start.saturating_add(max_buttons - 1));
        let start = start.min((end + 1).saturating_sub(max_buttons)).max(1);
        (start..=end).collect()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn snapshot(&self, max_buttons: usize) -> PageView<'_, T> {
        PageView {
            total_items: self.items.len(),
            total_pages: self.total_pages(),
            current_page: self.current_page,
            per_page: self.page_size,
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            page_window: self.page_window(max_buttons),
            items: self.current_page_items(),
        }
    }
}

impl<T: SortFields> ResultList<T> {
    pub fn sort_by(&mut self, key: &SortKey, order: SortOrder) {
        sort_items(&mut self.items, key, order);
        self.current_page = 1;
        debug!(key = %key, order = %order, "result set sorted");
    }
}

#[cfg(test)]
#[path = "tests/result_list_tests.rs"]
mod tests;
