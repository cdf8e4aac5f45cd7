use async_graphql::{EmptySubscription, Schema};

pub use crate::modules::engagements::use_cases::get_engagement_counts::inbound::graphql::QueryRoot;
pub use crate::modules::engagements::use_cases::toggle_engagement::inbound::graphql::MutationRoot;
pub use crate::shell::state::AppState;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn schema(state: AppState) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .finish()
}
