//! Infinite-scroll accumulation over the query pipeline.
//!
//! Views in infinite-scroll mode don't page: they keep a monotonically
//! growing visible window over the full filtered/sorted set. The engine is
//! re-queried with `PerPage::All` and the result is clipped to the window;
//! reaching the sentinel row grows the window by one step, and any filter
//! change snaps it back to the initial size.

use crate::query::engine::QueryOutput;

/// Growing visible-window state for an infinite-scroll view.
///
/// # Examples
///
/// ```
/// use invopak::query::ScrollState;
///
/// let mut scroll = ScrollState::new(20);
/// assert_eq!(scroll.visible(), 20);
/// scroll.advance();
/// assert_eq!(scroll.visible(), 40);
/// scroll.reset();
/// assert_eq!(scroll.visible(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    window: usize,
    visible: usize,
}

impl ScrollState {
    /// Creates a scroll state with the given window size (clamped to >= 1).
    #[must_use]
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            visible: window,
        }
    }

    /// The configured window (load-more step size).
    #[must_use]
    pub const fn window(&self) -> usize {
        self.window
    }

    /// Number of rows currently visible.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.visible
    }

    /// Grows the visible window by one step.
    pub fn advance(&mut self) {
        self.visible = self.visible.saturating_add(self.window);
    }

    /// Snaps the window back to its initial size (on any filter change).
    pub fn reset(&mut self) {
        self.visible = self.window;
    }

    /// Whether more rows remain beyond the current window.
    #[must_use]
    pub const fn has_more(&self, total_items: usize) -> bool {
        self.visible < total_items
    }

    /// Clips a full (`PerPage::All`) query result to the visible window.
    ///
    /// Returns the visible rows and whether more remain.
    #[must_use]
    pub fn clip<R>(&self, output: QueryOutput<R>) -> (Vec<R>, bool) {
        let has_more = self.has_more(output.total_items);
        let mut rows = output.rows;
        rows.truncate(self.visible);
        (rows, has_more)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(count: usize) -> QueryOutput<usize> {
        QueryOutput {
            rows: (0..count).collect(),
            total_items: count,
            page: 1,
            total_pages: 1,
            start_index: usize::from(count > 0),
            end_index: count,
        }
    }

    #[test]
    fn clips_to_the_visible_window() {
        let scroll = ScrollState::new(20);
        let (rows, has_more) = scroll.clip(output(50));
        assert_eq!(rows.len(), 20);
        assert!(has_more);
    }

    #[test]
    fn advancing_exhausts_the_set() {
        let mut scroll = ScrollState::new(20);
        scroll.advance();
        scroll.advance();
        let (rows, has_more) = scroll.clip(output(50));
        assert_eq!(rows.len(), 50);
        assert!(!has_more);
        assert!(!scroll.has_more(50));
    }

    #[test]
    fn reset_returns_to_one_window() {
        let mut scroll = ScrollState::new(20);
        scroll.advance();
        assert_eq!(scroll.visible(), 40);
        scroll.reset();
        assert_eq!(scroll.visible(), 20);
    }

    #[test]
    fn window_is_at_least_one() {
        let scroll = ScrollState::new(0);
        assert_eq!(scroll.window(), 1);
        assert_eq!(scroll.visible(), 1);
    }
}
