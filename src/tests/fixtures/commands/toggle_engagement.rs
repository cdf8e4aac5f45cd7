// Shared test fixture for the ToggleEngagement command.

use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::ToggleView;
use crate::modules::engagements::use_cases::toggle_engagement::command::ToggleEngagement;

pub struct ToggleEngagementBuilder {
    inner: ToggleEngagement,
}

impl Default for ToggleEngagementBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ToggleEngagementBuilder {
    pub fn new() -> Self {
        Self {
            inner: ToggleEngagement {
                subject_id: "work-fixed-0001".to_string(),
                viewer_id: "reader-fixed-0001".to_string(),
                kind: EngagementKind::Repost,
                current: ToggleView::new(false, 0),
                caption: None,
            },
        }
    }

    pub fn subject_id(mut self, v: impl Into<String>) -> Self {
        self.inner.subject_id = v.into();
        self
    }

    pub fn viewer_id(mut self, v: impl Into<String>) -> Self {
        self.inner.viewer_id = v.into();
        self
    }

    pub fn kind(mut self, v: EngagementKind) -> Self {
        self.inner.kind = v;
        self
    }

    pub fn current(mut self, v: ToggleView) -> Self {
        self.inner.current = v;
        self
    }

    pub fn caption(mut self, v: impl Into<String>) -> Self {
        self.inner.caption = Some(v.into());
        self
    }

    pub fn build(self) -> ToggleEngagement {
        self.inner
    }
}

#[cfg(test)]
mod toggle_engagement_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_build_the_default_repost_command() {
        let command = ToggleEngagementBuilder::default().build();
        assert_eq!(command.subject_id, "work-fixed-0001");
        assert_eq!(command.viewer_id, "reader-fixed-0001");
        assert_eq!(command.kind, EngagementKind::Repost);
        assert_eq!(command.current, ToggleView::new(false, 0));
        assert_eq!(command.caption, None);
    }

    #[rstest]
    fn it_should_override_fields_through_the_builder() {
        let command = ToggleEngagementBuilder::new()
            .subject_id("work-override")
            .viewer_id("reader-override")
            .kind(EngagementKind::Bookmark)
            .current(ToggleView::new(true, 7))
            .caption("hello")
            .build();
        assert_eq!(command.subject_id, "work-override");
        assert_eq!(command.viewer_id, "reader-override");
        assert_eq!(command.kind, EngagementKind::Bookmark);
        assert_eq!(command.current, ToggleView::new(true, 7));
        assert_eq!(command.caption.as_deref(), Some("hello"));
    }
}
