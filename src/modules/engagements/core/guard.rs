// Deduplication guard for view tracking.
//
// Purpose
// - Cap remote view writes at one per subject per observation session,
//   however many visibility transitions occur in between.
//
// Responsibilities
// - Pure local state. No remote side effects.
// - `reset` clears a subject's entry when a new subject takes its place so
//   stale guard state cannot suppress tracking of the new subject.

use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct DedupGuard {
    fired: HashSet<String>,
}

impl DedupGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_fired(&self, subject_id: &str) -> bool {
        self.fired.contains(subject_id)
    }

    pub fn mark_fired(&mut self, subject_id: &str) {
        self.fired.insert(subject_id.to_string());
    }

    /// Check-and-set in one step. Returns `true` when the subject had already
    /// fired, `false` when this call claimed the first fire.
    pub fn check_and_mark(&mut self, subject_id: &str) -> bool {
        !self.fired.insert(subject_id.to_string())
    }

    pub fn reset(&mut self, subject_id: &str) {
        self.fired.remove(subject_id);
    }
}

#[cfg(test)]
mod dedup_guard_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_start_unfired() {
        let guard = DedupGuard::new();
        assert!(!guard.has_fired("work-1"));
    }

    #[rstest]
    fn it_should_mark_a_subject_as_fired() {
        let mut guard = DedupGuard::new();
        guard.mark_fired("work-1");
        assert!(guard.has_fired("work-1"));
        assert!(!guard.has_fired("work-2"));
    }

    #[rstest]
    fn it_should_claim_the_first_fire_exactly_once() {
        let mut guard = DedupGuard::new();
        assert!(!guard.check_and_mark("work-1"));
        assert!(guard.check_and_mark("work-1"));
        assert!(guard.check_and_mark("work-1"));
    }

    #[rstest]
    fn it_should_allow_tracking_again_after_reset() {
        let mut guard = DedupGuard::new();
        guard.mark_fired("work-1");
        guard.reset("work-1");
        assert!(!guard.has_fired("work-1"));
    }
}
