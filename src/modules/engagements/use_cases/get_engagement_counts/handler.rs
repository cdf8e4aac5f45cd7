use std::sync::Arc;

use crate::modules::engagements::core::kind::EngagementKind;
use crate::shared::infrastructure::engagement_store::{EngagementStore, StoreError};

/// Engagement counters for one work, as shown next to it in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct EngagementCounts {
    pub views: i64,
    pub reposts: i64,
    pub likes: i64,
    pub bookmarks: i64,
    pub archived: bool,
}

/// Read side for engagement counters.
///
/// Counts are idempotent reads, so a transient store failure is retried once
/// and is invisible to the caller when the retry succeeds. Nothing here ever
/// retries a write.
pub struct CountReader<TStore>
where
    TStore: EngagementStore + 'static,
{
    store: Arc<TStore>,
}

impl<TStore> CountReader<TStore>
where
    TStore: EngagementStore + 'static,
{
    pub fn new(store: Arc<TStore>) -> Self {
        Self { store }
    }

    pub async fn count(
        &self,
        subject_id: &str,
        kind: EngagementKind,
    ) -> Result<i64, StoreError> {
        match self.store.get_count(subject_id, kind).await {
            Err(StoreError::Transient(first)) => {
                tracing::debug!(subject = %subject_id, %kind, error = %first, "retrying count read");
                self.store.get_count(subject_id, kind).await
            }
            other => other,
        }
    }

    pub async fn summary(&self, subject_id: &str) -> Result<EngagementCounts, StoreError> {
        Ok(EngagementCounts {
            views: self.count(subject_id, EngagementKind::View).await?,
            reposts: self.count(subject_id, EngagementKind::Repost).await?,
            likes: self.count(subject_id, EngagementKind::Like).await?,
            bookmarks: self.count(subject_id, EngagementKind::Bookmark).await?,
            archived: self.count(subject_id, EngagementKind::Archive).await? != 0,
        })
    }
}
