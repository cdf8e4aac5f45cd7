use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

use crate::shared::infrastructure::engagement_store::{EngagementStore, StoreError};
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct RecordViewResponse {
    /// `false` when the store already held a view record for this viewer.
    pub counted: bool,
}

/// Accept a view the client-side tracker has qualified. Anonymous viewers are
/// permitted; the `x-viewer-id` header, when present, lets the store
/// deduplicate repeat views.
pub async fn handle(
    State(state): State<AppState>,
    Path(work_id): Path<String>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let viewer_id = headers
        .get("x-viewer-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty());

    match state.store.record_view(&work_id, viewer_id).await {
        Ok(counted) => Json(RecordViewResponse { counted }).into_response(),
        Err(StoreError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(error) => {
            tracing::warn!(work = %work_id, %error, "view write failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
