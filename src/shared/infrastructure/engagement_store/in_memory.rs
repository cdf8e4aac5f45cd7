// In-memory implementation of the EngagementStore port.
//
// Purpose
// - Support handler tests and local development without the managed backend.
//
// Responsibilities
// - Enforce the one-record-per-(subject, viewer, kind) invariant.
// - Enforce owner-only archiving.
// - Offer fault injection (offline, latency, transient failures) so callers
//   can exercise their rollback and retry discipline.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::engagements::core::kind::EngagementKind;
use crate::shared::infrastructure::engagement_store::{
    EngagementStore, StoreError, ToggleOutcome,
};

#[derive(Debug, Default)]
struct WorkRow {
    owner: String,
    archived: bool,
    view_count: i64,
    counts: HashMap<EngagementKind, i64>,
    records: HashSet<(String, EngagementKind)>,
}

#[derive(Default)]
pub struct InMemoryEngagementStore {
    works: RwLock<HashMap<String, WorkRow>>,
    offline: bool,
    delay_ms: u64,
    transient_failures: AtomicU32,
    write_calls: AtomicU32,
}

impl InMemoryEngagementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails with a transient backend error.
    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
    }

    /// Delay every call by the given latency.
    pub fn set_delay_ms(&mut self, ms: u64) {
        self.delay_ms = ms;
    }

    /// Fail the next `n` calls with a transient error, then recover.
    pub fn inject_transient_failures(&self, n: u32) {
        self.transient_failures.store(n, Ordering::SeqCst);
    }

    /// Number of toggle writes dispatched to the store so far.
    pub fn write_calls(&self) -> u32 {
        self.write_calls.load(Ordering::SeqCst)
    }

    pub async fn insert_work(&self, owner_id: &str) -> String {
        let subject_id = format!("work-{}", Uuid::now_v7());
        let row = WorkRow {
            owner: owner_id.to_string(),
            ..WorkRow::default()
        };
        self.works.write().await.insert(subject_id.clone(), row);
        subject_id
    }

    async fn fallible_entry(&self) -> Result<(), StoreError> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.offline {
            return Err(StoreError::Transient("engagement store offline".into()));
        }
        let remaining = self.transient_failures.load(Ordering::SeqCst);
        if remaining > 0
            && self
                .transient_failures
                .compare_exchange(remaining, remaining - 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
        {
            return Err(StoreError::Transient("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EngagementStore for InMemoryEngagementStore {
    async fn record_view(
        &self,
        subject_id: &str,
        viewer_id: Option<&str>,
    ) -> Result<bool, StoreError> {
        self.fallible_entry().await?;
        let mut works = self.works.write().await;
        let row = works.get_mut(subject_id).ok_or(StoreError::NotFound)?;
        if let Some(viewer) = viewer_id {
            let key = (viewer.to_string(), EngagementKind::View);
            if !row.records.insert(key) {
                // Idempotent re-confirmation: the record exists, the counter
                // does not move.
                return Ok(false);
            }
        }
        row.view_count += 1;
        Ok(true)
    }

    async fn set_toggle_state(
        &self,
        subject_id: &str,
        viewer_id: &str,
        kind: EngagementKind,
        desired_state: bool,
    ) -> Result<ToggleOutcome, StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.fallible_entry().await?;
        if !kind.is_toggle() {
            return Err(StoreError::Validation(format!("{kind} is not a toggle")));
        }
        if viewer_id.is_empty() {
            return Err(StoreError::Unauthorized);
        }
        let mut works = self.works.write().await;
        let row = works.get_mut(subject_id).ok_or(StoreError::NotFound)?;

        if kind == EngagementKind::Archive {
            if row.owner != viewer_id {
                return Err(StoreError::Forbidden);
            }
            row.archived = desired_state;
            return Ok(ToggleOutcome {
                new_state: desired_state,
                count: i64::from(desired_state),
            });
        }

        let key = (viewer_id.to_string(), kind);
        let count = row.counts.entry(kind).or_insert(0);
        if desired_state {
            if row.records.insert(key) {
                *count += 1;
            }
        } else if row.records.remove(&key) {
            *count -= 1;
        }
        Ok(ToggleOutcome {
            new_state: desired_state,
            count: *count,
        })
    }

    async fn get_count(&self, subject_id: &str, kind: EngagementKind) -> Result<i64, StoreError> {
        self.fallible_entry().await?;
        let works = self.works.read().await;
        let row = works.get(subject_id).ok_or(StoreError::NotFound)?;
        let count = match kind {
            EngagementKind::View => row.view_count,
            EngagementKind::Archive => i64::from(row.archived),
            other => row.counts.get(&other).copied().unwrap_or(0),
        };
        Ok(count)
    }
}

#[cfg(test)]
mod in_memory_engagement_store_tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryEngagementStore {
        InMemoryEngagementStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_a_first_view_and_reconfirm_a_duplicate(
        store: InMemoryEngagementStore,
    ) {
        let work = store.insert_work("author-1").await;
        assert_eq!(store.record_view(&work, Some("reader-1")).await, Ok(true));
        assert_eq!(store.record_view(&work, Some("reader-1")).await, Ok(false));
        assert_eq!(store.get_count(&work, EngagementKind::View).await, Ok(1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_every_anonymous_view(store: InMemoryEngagementStore) {
        let work = store.insert_work("author-1").await;
        store.record_view(&work, None).await.expect("first view");
        store.record_view(&work, None).await.expect("second view");
        assert_eq!(store.get_count(&work, EngagementKind::View).await, Ok(2));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_at_most_one_record_per_viewer_and_kind(
        store: InMemoryEngagementStore,
    ) {
        let work = store.insert_work("author-1").await;
        for _ in 0..3 {
            store
                .set_toggle_state(&work, "reader-1", EngagementKind::Repost, true)
                .await
                .expect("toggle on");
        }
        assert_eq!(store.get_count(&work, EngagementKind::Repost).await, Ok(1));
        store
            .set_toggle_state(&work, "reader-1", EngagementKind::Repost, false)
            .await
            .expect("toggle off");
        assert_eq!(store.get_count(&work, EngagementKind::Repost).await, Ok(0));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_decrement_below_an_absent_record(store: InMemoryEngagementStore) {
        let work = store.insert_work("author-1").await;
        let outcome = store
            .set_toggle_state(&work, "reader-1", EngagementKind::Like, false)
            .await
            .expect("idempotent off");
        assert_eq!(outcome, ToggleOutcome { new_state: false, count: 0 });
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_only_the_owner_archive(store: InMemoryEngagementStore) {
        let work = store.insert_work("author-1").await;
        let result = store
            .set_toggle_state(&work, "reader-1", EngagementKind::Archive, true)
            .await;
        assert_eq!(result, Err(StoreError::Forbidden));

        let outcome = store
            .set_toggle_state(&work, "author-1", EngagementKind::Archive, true)
            .await
            .expect("owner archive");
        assert!(outcome.new_state);
        assert_eq!(store.get_count(&work, EngagementKind::Archive).await, Ok(1));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_not_found_for_an_unknown_work(store: InMemoryEngagementStore) {
        assert_eq!(
            store.record_view("work-missing", None).await,
            Err(StoreError::NotFound)
        );
        assert_eq!(
            store
                .set_toggle_state("work-missing", "reader-1", EngagementKind::Like, true)
                .await,
            Err(StoreError::NotFound)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_view_kind_toggle_before_touching_state(
        store: InMemoryEngagementStore,
    ) {
        let work = store.insert_work("author-1").await;
        let result = store
            .set_toggle_state(&work, "reader-1", EngagementKind::View, true)
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_every_call_while_offline(mut store: InMemoryEngagementStore) {
        store.toggle_offline();
        let result = store.record_view("work-1", None).await;
        assert!(matches!(result, Err(StoreError::Transient(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_recover_after_the_injected_failures_are_spent(
        store: InMemoryEngagementStore,
    ) {
        let work = store.insert_work("author-1").await;
        store.inject_transient_failures(1);
        assert!(matches!(
            store.get_count(&work, EngagementKind::View).await,
            Err(StoreError::Transient(_))
        ));
        assert_eq!(store.get_count(&work, EngagementKind::View).await, Ok(0));
    }
}
