use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::ToggleLifecycle;
use crate::modules::engagements::use_cases::toggle_engagement::command::ToggleEngagement;
use crate::modules::engagements::use_cases::toggle_engagement::decision::{
    DecideError, Decision,
};

pub const MAX_CAPTION_CHARS: usize = 280;

/// Pure toggle decision: validate the command against the local lifecycle
/// before anything is dispatched to the store.
pub fn decide_toggle(lifecycle: &ToggleLifecycle, command: &ToggleEngagement) -> Decision {
    if lifecycle.is_pending() {
        return Decision::Rejected {
            reason: DecideError::AlreadyPending,
        };
    }
    if let Some(caption) = &command.caption {
        if command.kind != EngagementKind::Repost {
            return Decision::Rejected {
                reason: DecideError::CaptionNotApplicable,
            };
        }
        if caption.chars().count() > MAX_CAPTION_CHARS {
            return Decision::Rejected {
                reason: DecideError::CaptionTooLong,
            };
        }
    }
    let optimistic = lifecycle.displayed().flipped();
    Decision::Accepted {
        optimistic,
        desired_state: optimistic.active,
    }
}
