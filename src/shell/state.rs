use std::sync::Arc;
use std::time::Duration;

use crate::modules::engagements::use_cases::get_engagement_counts::handler::CountReader;
use crate::modules::engagements::use_cases::toggle_engagement::handler::ToggleEngagementHandler;
use crate::shared::infrastructure::engagement_store::in_memory::InMemoryEngagementStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryEngagementStore>,
    pub toggles: Arc<ToggleEngagementHandler<InMemoryEngagementStore>>,
    pub counts: Arc<CountReader<InMemoryEngagementStore>>,
}

impl AppState {
    pub fn new(store: Arc<InMemoryEngagementStore>, commit_timeout: Duration) -> Self {
        Self {
            store: store.clone(),
            toggles: Arc::new(ToggleEngagementHandler::new(store.clone(), commit_timeout)),
            counts: Arc::new(CountReader::new(store)),
        }
    }
}

#[cfg(test)]
impl AppState {
    pub fn in_memory() -> Self {
        use crate::modules::engagements::use_cases::toggle_engagement::handler::DEFAULT_COMMIT_TIMEOUT;

        Self::new(
            Arc::new(InMemoryEngagementStore::new()),
            DEFAULT_COMMIT_TIMEOUT,
        )
    }

    pub fn offline_in_memory() -> Self {
        use crate::modules::engagements::use_cases::toggle_engagement::handler::DEFAULT_COMMIT_TIMEOUT;

        let mut store = InMemoryEngagementStore::new();
        store.toggle_offline();
        Self::new(Arc::new(store), DEFAULT_COMMIT_TIMEOUT)
    }
}
