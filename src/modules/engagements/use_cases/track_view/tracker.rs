// View tracker: one observed subject, one qualified view write at most.
//
// Purpose
// - Drive the dwell session from visibility signals, schedule the dwell timer
//   on the tokio clock, and dispatch `record_view` once the threshold elapses
//   while the subject is still visible.
//
// Responsibilities
// - Cancel the timer on hiding, on subject change, and on drop. A cancelled
//   timer never dispatches.
// - Consult the deduplication guard so remounted visibility cycles cannot
//   write twice for the same subject.
// - Degrade to a log line on store failure; never propagate a panic into the
//   observing region.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::modules::engagements::core::dwell::DwellSession;
use crate::modules::engagements::core::guard::DedupGuard;
use crate::shared::infrastructure::engagement_store::EngagementStore;

/// Matches the web client's default minimum view time.
pub const DEFAULT_DWELL: Duration = Duration::from_millis(3000);

struct TrackerShared {
    guard: DedupGuard,
    dwell: DwellSession,
}

pub struct ViewTracker<TStore>
where
    TStore: EngagementStore + 'static,
{
    store: Arc<TStore>,
    subject_id: String,
    viewer_id: Option<String>,
    threshold: Duration,
    started: Instant,
    shared: Arc<Mutex<TrackerShared>>,
    timer: Option<JoinHandle<()>>,
}

impl<TStore> ViewTracker<TStore>
where
    TStore: EngagementStore + 'static,
{
    pub fn new(
        store: Arc<TStore>,
        subject_id: impl Into<String>,
        viewer_id: Option<String>,
        threshold: Duration,
    ) -> Self {
        Self {
            store,
            subject_id: subject_id.into(),
            viewer_id,
            threshold,
            started: Instant::now(),
            shared: Arc::new(Mutex::new(TrackerShared {
                guard: DedupGuard::new(),
                dwell: DwellSession::new(threshold.as_millis() as i64),
            })),
            timer: None,
        }
    }

    /// Switch to a different subject. Cancels any pending countdown, starts a
    /// fresh dwell session, and resets the guard entry for the new subject so
    /// stale state cannot suppress its tracking.
    pub async fn observe(&mut self, subject_id: &str) {
        if self.subject_id == subject_id {
            return;
        }
        self.abort_timer();
        self.subject_id = subject_id.to_string();
        let mut shared = self.shared.lock().await;
        shared.guard.reset(subject_id);
        shared.dwell = DwellSession::new(self.threshold.as_millis() as i64);
    }

    /// Visibility signal from the observer collaborator.
    pub async fn set_visible(&mut self, visible: bool) {
        if !visible {
            self.cancel().await;
            return;
        }

        let now_ms = self.now_ms();
        let remaining = {
            let mut shared = self.shared.lock().await;
            if shared.guard.has_fired(&self.subject_id) || shared.dwell.has_qualified() {
                return;
            }
            if shared.dwell.is_visible() {
                // Repeated signal while the countdown is already running.
                return;
            }
            shared.dwell.on_visible(now_ms);
            shared.dwell.remaining_ms(now_ms).unwrap_or(0)
        };

        if remaining == 0 {
            Self::fire(
                self.store.clone(),
                self.shared.clone(),
                self.subject_id.clone(),
                self.viewer_id.clone(),
                self.started,
            )
            .await;
            return;
        }

        let store = self.store.clone();
        let shared = self.shared.clone();
        let subject_id = self.subject_id.clone();
        let viewer_id = self.viewer_id.clone();
        let started = self.started;
        // The deadline is anchored here, at the visibility signal. Anchoring
        // inside the task would start the countdown at its first poll, after
        // an arbitrary scheduling gap.
        let deadline = Instant::now() + Duration::from_millis(remaining as u64);
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            Self::fire(store, shared, subject_id, viewer_id, started).await;
        }));
    }

    /// Cancel any pending countdown and mark the dwell session hidden, so the
    /// next visible signal restarts the countdown from zero. Guard state is
    /// untouched.
    pub async fn cancel(&mut self) {
        self.abort_timer();
        self.shared.lock().await.dwell.on_hidden();
    }

    fn abort_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn now_ms(&self) -> i64 {
        self.started.elapsed().as_millis() as i64
    }

    async fn fire(
        store: Arc<TStore>,
        shared: Arc<Mutex<TrackerShared>>,
        subject_id: String,
        viewer_id: Option<String>,
        started: Instant,
    ) {
        let should_dispatch = {
            let mut shared = shared.lock().await;
            let now_ms = started.elapsed().as_millis() as i64;
            shared.dwell.poll(now_ms) && !shared.guard.check_and_mark(&subject_id)
        };
        if !should_dispatch {
            return;
        }
        match store.record_view(&subject_id, viewer_id.as_deref()).await {
            Ok(counted) => {
                tracing::debug!(subject = %subject_id, counted, "view recorded");
            }
            Err(error) => {
                tracing::warn!(subject = %subject_id, %error, "view not recorded");
            }
        }
    }
}

impl<TStore> Drop for ViewTracker<TStore>
where
    TStore: EngagementStore + 'static,
{
    fn drop(&mut self) {
        self.abort_timer();
    }
}
