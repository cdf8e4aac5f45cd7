use async_trait::async_trait;
use thiserror::Error;

use crate::modules::engagements::core::kind::EngagementKind;

/// Failure taxonomy of the remote engagement store, mirroring HTTP-style
/// status semantics. Callers discriminate on the variant; nothing here is a
/// catch-all they are expected to swallow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("no valid session")]
    Unauthorized,

    #[error("viewer is not allowed to modify this work")]
    Forbidden,

    #[error("work not found")]
    NotFound,

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    Transient(String),
}

/// Outcome of a toggle write: the state the store settled on and the counter
/// after the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub new_state: bool,
    pub count: i64,
}

/// Remote engagement store port.
///
/// Every call is fallible and possibly slow. Policy for the callers: reads
/// may be retried once on `Transient`; writes are never retried automatically
/// because the store's idempotency guarantees are unknown.
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Record one qualified view. Returns `true` when the view counter moved,
    /// `false` when the store already held a view record for this viewer and
    /// idempotently re-confirmed it.
    async fn record_view(
        &self,
        subject_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<bool, StoreError>;

    /// Set a toggle to an absolute desired state. Carrying the intended state
    /// rather than a relative increment keeps a late previous write from
    /// producing a lost update.
    async fn set_toggle_state(
        &self,
        subject_id: &str,
        viewer_id: &str,
        kind: EngagementKind,
        desired_state: bool,
    ) -> Result<ToggleOutcome, StoreError>;

    async fn get_count(&self, subject_id: &str, kind: EngagementKind) -> Result<i64, StoreError>;
}

pub mod in_memory;
