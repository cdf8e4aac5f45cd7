use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::engagements::use_cases::get_engagement_counts::handler::EngagementCounts;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlEngagementCounts {
    pub views: i64,
    pub reposts: i64,
    pub likes: i64,
    pub bookmarks: i64,
    pub archived: bool,
}

impl From<EngagementCounts> for GqlEngagementCounts {
    fn from(counts: EngagementCounts) -> Self {
        Self {
            views: counts.views,
            reposts: counts.reposts,
            likes: counts.likes,
            bookmarks: counts.bookmarks,
            archived: counts.archived,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn engagement_counts(
        &self,
        context: &Context<'_>,
        work_id: String,
    ) -> GqlResult<GqlEngagementCounts> {
        let state = context.data_unchecked::<AppState>();
        let counts = state
            .counts
            .summary(&work_id)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        Ok(counts.into())
    }
}
