use serde::Serialize;

/// Rows per page.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `count` rows; 0 when there are none.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// 1-based page cursor over a filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Paginator {
    current_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self { current_page: 1 }
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Rows `[(page-1)*PAGE_SIZE, page*PAGE_SIZE)` of `view`, truncated at its end.
    pub fn page<'v, T>(&self, view: &'v [T]) -> &'v [T] {
        let start = (self.current_page - 1).saturating_mul(PAGE_SIZE).min(view.len());
        let end = start.saturating_add(PAGE_SIZE).min(view.len());
        &view[start..end]
    }

    /// Move to page `n`. Returns false and leaves the cursor alone when `n`
    /// falls outside `1..=total_pages`.
    pub fn go_to_page(&mut self, n: usize, total_pages: usize) -> bool {
        if n < 1 || n > total_pages {
            return false;
        }
        self.current_page = n;
        true
    }

    pub fn first(&mut self, total_pages: usize) -> bool {
        self.go_to_page(1, total_pages)
    }

    pub fn previous(&mut self, total_pages: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(n) => self.go_to_page(n, total_pages),
            None => false,
        }
    }

    pub fn next(&mut self, total_pages: usize) -> bool {
        self.go_to_page(self.current_page + 1, total_pages)
    }

    pub fn last(&mut self, total_pages: usize) -> bool {
        self.go_to_page(total_pages, total_pages)
    }
}
