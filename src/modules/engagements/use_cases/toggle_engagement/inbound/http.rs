use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::modules::engagements::core::kind::EngagementKind;
use crate::modules::engagements::core::toggle::ToggleView;
use crate::modules::engagements::use_cases::toggle_engagement::command::ToggleEngagement;
use crate::modules::engagements::use_cases::toggle_engagement::decision::DecideError;
use crate::modules::engagements::use_cases::toggle_engagement::handler::ToggleError;
use crate::shared::infrastructure::engagement_store::StoreError;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct ToggleBody {
    pub desired_state: bool,
    pub caption: Option<String>,
    /// Counter the client is currently displaying; seeds the optimistic view.
    pub current_count: Option<i64>,
}

#[derive(Serialize)]
pub struct ToggleSuccessResponse {
    pub success: bool,
    pub new_state: bool,
    pub count: i64,
}

#[derive(Serialize)]
pub struct ToggleErrorResponse {
    pub success: bool,
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ToggleErrorResponse {
            success: false,
            error: message.into(),
        }),
    )
        .into_response()
}

fn failure_status(error: &ToggleError) -> StatusCode {
    match error {
        ToggleError::Rejected(DecideError::AlreadyPending) => StatusCode::CONFLICT,
        ToggleError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ToggleError::Store(StoreError::Unauthorized) => StatusCode::UNAUTHORIZED,
        ToggleError::Store(StoreError::Forbidden) => StatusCode::FORBIDDEN,
        ToggleError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        ToggleError::Store(StoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        ToggleError::Store(StoreError::Transient(_)) | ToggleError::Timeout(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub async fn handle(
    State(state): State<AppState>,
    Path((work_id, kind)): Path<(String, String)>,
    headers: HeaderMap,
    body: Result<Json<ToggleBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => {
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text());
        }
    };

    let Some(viewer_id) = headers
        .get("x-viewer-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
    else {
        return error_response(StatusCode::UNAUTHORIZED, StoreError::Unauthorized.to_string());
    };

    let kind = match kind.parse::<EngagementKind>() {
        Ok(kind) if kind.is_toggle() => kind,
        Ok(kind) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{kind} is not a toggle"),
            );
        }
        Err(error) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
    };

    let command = ToggleEngagement {
        subject_id: work_id,
        viewer_id: viewer_id.to_string(),
        kind,
        current: ToggleView::new(!body.desired_state, body.current_count.unwrap_or(0)),
        caption: body.caption,
    };

    match state.toggles.handle(command).await {
        Ok(committed) => Json(ToggleSuccessResponse {
            success: true,
            new_state: committed.active,
            count: committed.count,
        })
        .into_response(),
        Err(failure) => error_response(failure_status(&failure.error), failure.error.to_string()),
    }
}
