use axum::{
    Router,
    routing::{get, post},
};

use crate::modules::engagements::use_cases::get_engagement_counts::inbound::http as counts_http;
use crate::modules::engagements::use_cases::publish_work::inbound::http as publish_http;
use crate::modules::engagements::use_cases::toggle_engagement::inbound::http as toggle_http;
use crate::modules::engagements::use_cases::track_view::inbound::http as view_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/works", post(publish_http::handle))
        .route("/works/{id}/view", post(view_http::handle))
        .route(
            "/works/{id}/engagements/{kind}",
            post(toggle_http::handle),
        )
        .route("/works/{id}/counts", get(counts_http::handle))
        .with_state(state)
}
