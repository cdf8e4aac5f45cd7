use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::ToggleView;

/// Request to flip one binary engagement for one viewer.
///
/// `current` is the view the caller is displaying right now; it seeds the
/// local lifecycle whenever no toggle for this (subject, viewer, kind) is
/// already in flight, and it is the state a rollback returns to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleEngagement {
    pub subject_id: String,
    pub viewer_id: String,
    pub kind: EngagementKind,
    pub current: ToggleView,
    pub caption: Option<String>,
}
