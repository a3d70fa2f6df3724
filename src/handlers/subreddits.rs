use axum::extract::{Path, State};
use serde_json::{Map, Value};

use crate::api::format::{get_all_users, single_subreddit, subreddits_index, SubredditMembers};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /subreddits - usernames grouped by subreddit
pub async fn collection_get(State(state): State<AppState>) -> ApiResult<Map<String, Value>> {
    let users = get_all_users(&state.store).await?;
    Ok(ApiResponse::success(subreddits_index(&users)))
}

/// GET /subreddits/:name - case-insensitive match; an unknown name is an empty list, not a failure
pub async fn record_get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<SubredditMembers> {
    let users = get_all_users(&state.store).await?;
    Ok(ApiResponse::success(single_subreddit(&name, &users)))
}
