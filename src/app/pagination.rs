//! Page arithmetic for list views.
//!
//! [`PageState`] is derived fresh from every list response; it is never
//! mutated in place.

use std::num::NonZeroUsize;

/// Rows per page when the config does not say otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// Derived pagination state for one list response.
///
/// `current_page` is 1-based and always within `1..=total_pages`.
/// `total_pages` is at least 1, even for an empty collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: NonZeroUsize,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageState {
    /// Computes page state for `total_items` rows, clamping `current_page`
    /// into range.
    #[must_use]
    pub fn compute(total_items: u64, page_size: NonZeroUsize, current_page: usize) -> Self {
        let size = page_size.get() as u64;
        let pages = total_items.div_ceil(size).max(1);
        let total_pages = usize::try_from(pages).unwrap_or(usize::MAX);
        let current_page = current_page.clamp(1, total_pages);

        Self {
            current_page,
            total_pages,
            page_size,
            total_items,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// State before the first response arrives.
    #[must_use]
    pub fn empty(page_size: NonZeroUsize) -> Self {
        Self::compute(0, page_size, 1)
    }

    /// Offset of the first row of `page` (1-based).
    #[must_use]
    pub fn offset_of(page: usize, page_size: NonZeroUsize) -> usize {
        page.saturating_sub(1).saturating_mul(page_size.get())
    }

    /// Footer text, e.g. `Page 2/3 (23 total)`.
    #[must_use]
    pub fn indicator(&self) -> String {
        format!(
            "Page {}/{} ({} total)",
            self.current_page, self.total_pages, self.total_items
        )
    }
}
