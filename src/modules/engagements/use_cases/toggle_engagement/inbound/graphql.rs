use async_graphql::{Context, Object, Result as GqlResult};

use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::ToggleView;
use crate::modules::engagements::use_cases::toggle_engagement::command::ToggleEngagement;
use crate::shell::state::AppState;

#[derive(async_graphql::SimpleObject, Clone)]
pub struct GqlToggleResult {
    pub success: bool,
    pub new_state: bool,
    pub count: i64,
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[allow(clippy::too_many_arguments)]
    async fn toggle_engagement(
        &self,
        context: &Context<'_>,
        work_id: String,
        viewer_id: String,
        kind: String,
        desired_state: bool,
        caption: Option<String>,
        current_count: Option<i64>,
    ) -> GqlResult<GqlToggleResult> {
        let kind = kind
            .parse::<EngagementKind>()
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;
        if !kind.is_toggle() {
            return Err(async_graphql::Error::new(format!("{kind} is not a toggle")));
        }

        let state = context.data_unchecked::<AppState>();
        let command = ToggleEngagement {
            subject_id: work_id,
            viewer_id,
            kind,
            current: ToggleView::new(!desired_state, current_count.unwrap_or(0)),
            caption,
        };

        let committed = state
            .toggles
            .handle(command)
            .await
            .map_err(|failure| async_graphql::Error::new(failure.error.to_string()))?;

        Ok(GqlToggleResult {
            success: true,
            new_state: committed.active,
            count: committed.count,
        })
    }
}
