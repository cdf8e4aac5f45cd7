use crate::modules::engagements::core::toggle::ToggleView;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecideError {
    /// A toggle for this (subject, viewer, kind) is already in flight. Rejected
    /// locally; the store is never contacted.
    #[error("a toggle for this work is already pending")]
    AlreadyPending,

    #[error("caption exceeds {max} characters", max = super::decide::MAX_CAPTION_CHARS)]
    CaptionTooLong,

    #[error("captions only apply to reposts")]
    CaptionNotApplicable,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Decision {
    Accepted {
        /// View to display while the write is in flight.
        optimistic: ToggleView,
        /// Absolute state to send to the store.
        desired_state: bool,
    },
    Rejected {
        reason: DecideError,
    },
}
