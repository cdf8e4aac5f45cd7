// Dwell session: the minimum-visibility countdown for a single subject.
//
// Purpose
// - Decide when a view is genuine: the subject must stay continuously visible
//   for the configured threshold. Time spent hidden does not count, and losing
//   visibility restarts the countdown from zero rather than resuming it.
//
// How it is used
// - Pure over millisecond timestamps supplied by the caller, so the view
//   tracker can drive it from the tokio clock and tests can drive it from
//   fixed numbers.

#[derive(Debug)]
pub struct DwellSession {
    threshold_ms: i64,
    visible_since: Option<i64>,
    qualified: bool,
}

impl DwellSession {
    pub fn new(threshold_ms: i64) -> Self {
        Self {
            threshold_ms,
            visible_since: None,
            qualified: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible_since.is_some()
    }

    pub fn has_qualified(&self) -> bool {
        self.qualified
    }

    /// Visibility gained at `at_ms`. A repeated signal while already visible
    /// keeps the original countdown start.
    pub fn on_visible(&mut self, at_ms: i64) {
        if self.visible_since.is_none() {
            self.visible_since = Some(at_ms);
        }
    }

    /// Visibility lost. Discards any partial countdown.
    pub fn on_hidden(&mut self) {
        self.visible_since = None;
    }

    /// Milliseconds of continuous visibility still required at `now_ms`, or
    /// `None` while hidden or after qualification.
    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        if self.qualified {
            return None;
        }
        let since = self.visible_since?;
        Some((self.threshold_ms - (now_ms - since)).max(0))
    }

    /// Returns `true` exactly once, at the first poll where the threshold has
    /// elapsed while visible. A zero threshold qualifies on first visibility.
    pub fn poll(&mut self, now_ms: i64) -> bool {
        if self.qualified {
            return false;
        }
        match self.visible_since {
            Some(since) if now_ms - since >= self.threshold_ms => {
                self.qualified = true;
                true
            }
            _ => false,
        }
    }
}
