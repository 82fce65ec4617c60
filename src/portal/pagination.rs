// src/portal/pagination.rs

/// Page counter of one paginated list in one page view.
///
/// The backend does not report totals, so "next" is speculative: it stays
/// enabled while the current page had items, and a page that comes back empty
/// disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    last_len: Option<usize>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    pub fn new() -> Self {
        Self {
            page: 1,
            last_len: None,
        }
    }

    /// Current 1-indexed page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Records how many items the current page returned.
    pub fn record(&mut self, len: usize) {
        self.last_len = Some(len);
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// False until the current page has loaded, and when it loaded empty.
    pub fn can_next(&self) -> bool {
        self.last_len.is_some_and(|len| len > 0)
    }

    /// Advances one page if allowed. Returns whether the page changed.
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.page += 1;
        self.last_len = None;
        true
    }

    /// Goes back one page, never below 1. Returns whether the page changed.
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.page -= 1;
        self.last_len = None;
        true
    }
}
