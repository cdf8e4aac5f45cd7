use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::shared::infrastructure::engagement_store::StoreError;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(work_id): Path<String>) -> impl IntoResponse {
    match state.counts.summary(&work_id).await {
        Ok(counts) => Json(counts).into_response(),
        Err(StoreError::NotFound) => StatusCode::NOT_FOUND.into_response(),
        Err(error) => {
            tracing::warn!(work = %work_id, %error, "count read failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
