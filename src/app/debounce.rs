//! Quiet-window debouncing for the free-text search input.
//!
//! Re-querying on every keystroke is the one interactive-path cost worth
//! suppressing, so search input is buffered until the user pauses typing.
//! The debouncer is a pure millisecond-clock state machine: the host feeds it
//! keystrokes stamped with a monotonic clock and periodic ticks carrying the
//! same clock, and it releases the pending query once the quiet window has
//! elapsed. No timers, threads, or wall-clock reads live here, which keeps
//! the behavior deterministic under test.

/// Default quiet window between the last keystroke and the query, in
/// milliseconds.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: i64 = 300;

/// Buffers search keystrokes until a quiet window elapses.
///
/// # Examples
///
/// ```
/// use invopak::app::SearchDebouncer;
///
/// let mut debouncer = SearchDebouncer::new(300);
/// debouncer.submit("ac", 1_000);
/// debouncer.submit("acme", 1_150);
///
/// // Still inside the quiet window of the last keystroke.
/// assert_eq!(debouncer.poll(1_300), None);
/// // 300ms after the last keystroke the pending term is released once.
/// assert_eq!(debouncer.poll(1_450).as_deref(), Some("acme"));
/// assert_eq!(debouncer.poll(1_500), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchDebouncer {
    window_ms: i64,
    pending: Option<String>,
    deadline_ms: i64,
}

impl SearchDebouncer {
    /// Creates a debouncer with the given quiet window in milliseconds.
    ///
    /// A window of 0 releases every keystroke on the next poll.
    #[must_use]
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms: window_ms.max(0),
            pending: None,
            deadline_ms: 0,
        }
    }

    /// Records a keystroke at the given clock reading, restarting the quiet
    /// window.
    pub fn submit(&mut self, text: impl Into<String>, now_ms: i64) {
        self.pending = Some(text.into());
        self.deadline_ms = now_ms.saturating_add(self.window_ms);
    }

    /// Releases the pending search term if the quiet window has elapsed.
    ///
    /// Returns `None` while typing continues or when nothing is pending.
    pub fn poll(&mut self, now_ms: i64) -> Option<String> {
        if self.pending.is_some() && now_ms >= self.deadline_ms {
            self.pending.take()
        } else {
            None
        }
    }

    /// Releases the pending term immediately, ignoring the quiet window.
    ///
    /// Used when the view unmounts or the user presses Enter.
    pub fn flush(&mut self) -> Option<String> {
        self.pending.take()
    }

    /// Whether a keystroke is buffered and waiting for its quiet window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_keystrokes_extend_the_window() {
        let mut d = SearchDebouncer::new(300);
        d.submit("a", 0);
        d.submit("ab", 200);
        d.submit("abc", 400);
        assert_eq!(d.poll(650), None);
        assert_eq!(d.poll(700).as_deref(), Some("abc"));
        assert!(!d.is_pending());
    }

    #[test]
    fn flush_releases_immediately() {
        let mut d = SearchDebouncer::new(300);
        d.submit("partial", 0);
        assert_eq!(d.flush().as_deref(), Some("partial"));
        assert_eq!(d.poll(1_000), None);
    }

    #[test]
    fn zero_window_releases_on_next_poll() {
        let mut d = SearchDebouncer::new(0);
        d.submit("x", 10);
        assert_eq!(d.poll(10).as_deref(), Some("x"));
    }
}
