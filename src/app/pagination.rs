//! Pagination window calculation.
//!
//! Derives which page buttons to show around the current page. The window is
//! `radius` pages either side of the current page, clipped to the valid range,
//! with optional jump-to-first/last buttons and ellipses marking gaps.
//!
//! ```text
//! current=5, total=20, radius=2
//!
//!   ‹ prev   1  …  4 5 [6] 7 8  …  20   next ›
//!            │  │  └───┬────┘  │  │
//!     show_first  │  pages 3..=7  │  show_last
//!  leading_ellipsis          trailing_ellipsis
//! ```

use serde::{Deserialize, Serialize};

/// Default number of pages shown either side of the current page.
pub const DEFAULT_RADIUS: u32 = 2;

/// A bounded window of page buttons.
///
/// All page numbers are zero-based; adapters add one when labelling buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// The current page.
    pub current: u32,
    /// Total number of pages (always greater than 1).
    pub total: u32,
    /// Contiguous page numbers around `current`, ascending.
    pub pages: Vec<u32>,
    /// Page 0 is outside `pages` and gets its own button.
    pub show_first: bool,
    /// There is a gap between page 0 and the start of `pages`.
    pub show_leading_ellipsis: bool,
    /// The last page is outside `pages` and gets its own button.
    pub show_last: bool,
    /// There is a gap between the end of `pages` and the last page.
    pub show_trailing_ellipsis: bool,
    /// A "previous" control is enabled (`current > 0`).
    pub has_previous: bool,
    /// A "next" control is enabled (`current < total - 1`).
    pub has_next: bool,
}

impl PageWindow {
    /// Zero-based index of the last page.
    #[must_use]
    pub const fn last_page(&self) -> u32 {
        self.total - 1
    }
}

/// Computes the pagination window for `current_page` out of `total_pages`.
///
/// Returns `None` when there is at most one page: no pagination controls are
/// rendered in that case. A `current_page` past the end is clamped to the last
/// page.
///
/// # Examples
///
/// ```
/// use findy::app::pagination::compute_window;
///
/// let window = compute_window(5, 20, 2).unwrap();
/// assert_eq!(window.pages, vec![3, 4, 5, 6, 7]);
/// assert!(window.show_first && window.show_leading_ellipsis);
/// assert!(window.show_last && window.show_trailing_ellipsis);
///
/// assert!(compute_window(0, 1, 2).is_none());
/// ```
#[must_use]
pub fn compute_window(current_page: u32, total_pages: u32, radius: u32) -> Option<PageWindow> {
    if total_pages <= 1 {
        return None;
    }

    let last = total_pages - 1;
    let current = current_page.min(last);
    let start = current.saturating_sub(radius);
    let end = current.saturating_add(radius).min(last);

    Some(PageWindow {
        current,
        total: total_pages,
        pages: (start..=end).collect(),
        show_first: start > 0,
        show_leading_ellipsis: start > 1,
        show_last: end < last,
        show_trailing_ellipsis: end + 1 < last,
        has_previous: current > 0,
        has_next: current < last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_shows_everything() {
        let window = compute_window(5, 20, 2).unwrap();
        assert_eq!(window.pages, vec![3, 4, 5, 6, 7]);
        assert!(window.show_first);
        assert!(window.show_leading_ellipsis);
        assert!(window.show_last);
        assert!(window.show_trailing_ellipsis);
        assert!(window.has_previous);
        assert!(window.has_next);
    }

    #[test]
    fn single_page_has_no_controls() {
        assert!(compute_window(0, 1, DEFAULT_RADIUS).is_none());
        assert!(compute_window(0, 0, DEFAULT_RADIUS).is_none());
    }

    #[test]
    fn first_page_disables_previous() {
        let window = compute_window(0, 10, 2).unwrap();
        assert_eq!(window.pages, vec![0, 1, 2]);
        assert!(!window.show_first);
        assert!(!window.show_leading_ellipsis);
        assert!(!window.has_previous);
        assert!(window.has_next);
        assert!(window.show_last);
        assert!(window.show_trailing_ellipsis);
    }

    #[test]
    fn last_page_disables_next() {
        let window = compute_window(9, 10, 2).unwrap();
        assert_eq!(window.pages, vec![7, 8, 9]);
        assert!(!window.has_next);
        assert!(!window.show_last);
        assert!(!window.show_trailing_ellipsis);
        assert!(window.show_first);
        assert!(window.show_leading_ellipsis);
    }

    #[test]
    fn adjacent_first_page_needs_no_ellipsis() {
        // Window starts at 1: page 0 gets a button but there is no gap.
        let window = compute_window(3, 10, 2).unwrap();
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(window.show_first);
        assert!(!window.show_leading_ellipsis);
    }

    #[test]
    fn adjacent_last_page_needs_no_ellipsis() {
        let window = compute_window(6, 10, 2).unwrap();
        assert_eq!(window.pages, vec![4, 5, 6, 7, 8]);
        assert!(window.show_last);
        assert!(!window.show_trailing_ellipsis);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        let window = compute_window(40, 3, 2).unwrap();
        assert_eq!(window.current, 2);
        assert_eq!(window.pages, vec![0, 1, 2]);
        assert!(!window.has_next);
    }

    #[test]
    fn zero_radius_shows_only_current() {
        let window = compute_window(4, 10, 0).unwrap();
        assert_eq!(window.pages, vec![4]);
        assert_eq!(window.last_page(), 9);
    }
}
