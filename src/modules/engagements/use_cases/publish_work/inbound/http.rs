use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct PublishWorkResponse {
    pub work_id: String,
}

/// Publish a new work. The authenticated viewer becomes the owner, which is
/// what the archive toggle's ownership check is enforced against.
pub async fn handle(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(owner_id) = headers
        .get("x-viewer-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    else {
        return StatusCode::UNAUTHORIZED.into_response();
    };

    let work_id = state.store.insert_work(owner_id).await;
    (StatusCode::CREATED, Json(PublishWorkResponse { work_id })).into_response()
}
