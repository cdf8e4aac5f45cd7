use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::timeout;

use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::{ToggleLifecycle, ToggleView};
use crate::modules::engagements::use_cases::toggle_engagement::command::ToggleEngagement;
use crate::modules::engagements::use_cases::toggle_engagement::decide::decide_toggle;
use crate::modules::engagements::use_cases::toggle_engagement::decision::{
    DecideError, Decision,
};
use crate::shared::infrastructure::engagement_store::{EngagementStore, StoreError};

pub const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Toggle state is per engagement record, so sessions are keyed by
/// (subject, viewer, kind); two viewers never share lifecycle state.
type SessionKey = (String, String, EngagementKind);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToggleError {
    #[error("toggle rejected: {0}")]
    Rejected(#[from] DecideError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("store did not confirm within {0:?}")]
    Timeout(Duration),
}

/// A failed toggle, carrying the view the caller should display after the
/// rollback. The displayed state is never left wrong silently.
#[derive(Debug, PartialEq, Eq)]
pub struct ToggleFailure {
    pub error: ToggleError,
    pub displayed: ToggleView,
}

/// Optimistic toggle synchronizer.
///
/// Per (subject, viewer, kind) the lifecycle is `Idle -> Pending -> Idle`:
/// the displayed view flips before the store confirms, a concurrent toggle on
/// the same key is rejected locally, and any write failure (including the
/// commit timeout) rolls the view back to the exact pre-toggle state. Writes
/// carry the absolute desired state, never a relative increment.
///
/// The session map holds only in-flight toggles; an entry is seeded from the
/// command's own displayed view and removed again once the write settles, so
/// the map never accumulates state for every work a client has named.
pub struct ToggleEngagementHandler<TStore>
where
    TStore: EngagementStore + 'static,
{
    store: Arc<TStore>,
    commit_timeout: Duration,
    sessions: Mutex<HashMap<SessionKey, ToggleLifecycle>>,
}

impl<TStore> ToggleEngagementHandler<TStore>
where
    TStore: EngagementStore + 'static,
{
    pub fn new(store: Arc<TStore>, commit_timeout: Duration) -> Self {
        Self {
            store,
            commit_timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The optimistic view while a write for this (subject, viewer, kind) is
    /// in flight. `None` once settled; callers then fall back to the view the
    /// last `handle` call returned, or to the store.
    pub async fn current_view(
        &self,
        subject_id: &str,
        viewer_id: &str,
        kind: EngagementKind,
    ) -> Option<ToggleView> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(&(subject_id.to_string(), viewer_id.to_string(), kind))
            .map(ToggleLifecycle::displayed)
    }

    pub async fn handle(&self, command: ToggleEngagement) -> Result<ToggleView, ToggleFailure> {
        let key = (
            command.subject_id.clone(),
            command.viewer_id.clone(),
            command.kind,
        );

        // Decide and flip under the lock so two callers cannot both observe
        // an idle key and race a doubled toggle.
        let (prior, desired_state) = {
            let mut sessions = self.sessions.lock().await;
            let lifecycle = sessions
                .get(&key)
                .cloned()
                .unwrap_or(ToggleLifecycle::Idle(command.current));
            match decide_toggle(&lifecycle, &command) {
                Decision::Rejected { reason } => {
                    return Err(ToggleFailure {
                        error: ToggleError::Rejected(reason),
                        displayed: lifecycle.displayed(),
                    });
                }
                Decision::Accepted {
                    optimistic,
                    desired_state,
                } => {
                    let prior = lifecycle.displayed();
                    sessions.insert(key.clone(), ToggleLifecycle::Pending { prior, optimistic });
                    (prior, desired_state)
                }
            }
        };

        let write = self.store.set_toggle_state(
            &command.subject_id,
            &command.viewer_id,
            command.kind,
            desired_state,
        );

        match timeout(self.commit_timeout, write).await {
            Ok(Ok(outcome)) => {
                let committed = ToggleView::new(outcome.new_state, outcome.count);
                self.settle(&key).await;
                tracing::debug!(
                    subject = %command.subject_id,
                    viewer = %command.viewer_id,
                    kind = %command.kind,
                    new_state = committed.active,
                    count = committed.count,
                    "toggle committed"
                );
                Ok(committed)
            }
            Ok(Err(error)) => {
                self.settle(&key).await;
                tracing::warn!(
                    subject = %command.subject_id,
                    viewer = %command.viewer_id,
                    kind = %command.kind,
                    %error,
                    "toggle rolled back"
                );
                Err(ToggleFailure {
                    error: ToggleError::Store(error),
                    displayed: prior,
                })
            }
            Err(_elapsed) => {
                self.settle(&key).await;
                tracing::warn!(
                    subject = %command.subject_id,
                    viewer = %command.viewer_id,
                    kind = %command.kind,
                    timeout_ms = self.commit_timeout.as_millis() as u64,
                    "toggle abandoned after commit timeout"
                );
                Err(ToggleFailure {
                    error: ToggleError::Timeout(self.commit_timeout),
                    displayed: prior,
                })
            }
        }
    }

    async fn settle(&self, key: &SessionKey) {
        self.sessions.lock().await.remove(key);
    }
}
