/// The displayed state of a binary engagement: whether the viewer has it
/// switched on, and the shared counter shown next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToggleView {
    pub active: bool,
    pub count: i64,
}

impl ToggleView {
    pub fn new(active: bool, count: i64) -> Self {
        Self { active, count }
    }

    /// The optimistic flip: negate the flag and move the counter by one in
    /// the matching direction.
    pub fn flipped(self) -> Self {
        Self {
            active: !self.active,
            count: if self.active {
                self.count - 1
            } else {
                self.count + 1
            },
        }
    }
}

/// Per-(subject, viewer, kind) toggle lifecycle.
///
/// `Pending` holds both the pre-toggle view (for rollback) and the optimistic
/// view (what the caller displays while the write is in flight). Commit and
/// rollback both land back in `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleLifecycle {
    Idle(ToggleView),
    Pending {
        prior: ToggleView,
        optimistic: ToggleView,
    },
}

impl ToggleLifecycle {
    pub fn is_pending(&self) -> bool {
        matches!(self, ToggleLifecycle::Pending { .. })
    }

    /// The view a caller should display right now.
    pub fn displayed(&self) -> ToggleView {
        match self {
            ToggleLifecycle::Idle(view) => *view,
            ToggleLifecycle::Pending { optimistic, .. } => *optimistic,
        }
    }
}

#[cfg(test)]
mod toggle_view_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_flip_on_and_increment_the_counter() {
        let view = ToggleView::new(false, 5);
        assert_eq!(view.flipped(), ToggleView::new(true, 6));
    }

    #[rstest]
    fn it_should_flip_off_and_decrement_the_counter() {
        let view = ToggleView::new(true, 6);
        assert_eq!(view.flipped(), ToggleView::new(false, 5));
    }

    #[rstest]
    fn it_should_round_trip_back_to_the_baseline() {
        let baseline = ToggleView::new(false, 41);
        assert_eq!(baseline.flipped().flipped(), baseline);
    }

    #[rstest]
    fn it_should_display_the_optimistic_view_while_pending() {
        let prior = ToggleView::new(false, 5);
        let lifecycle = ToggleLifecycle::Pending {
            prior,
            optimistic: prior.flipped(),
        };
        assert!(lifecycle.is_pending());
        assert_eq!(lifecycle.displayed(), ToggleView::new(true, 6));
    }

    #[rstest]
    fn it_should_display_the_settled_view_while_idle() {
        let lifecycle = ToggleLifecycle::Idle(ToggleView::new(true, 9));
        assert!(!lifecycle.is_pending());
        assert_eq!(lifecycle.displayed(), ToggleView::new(true, 9));
    }
}
