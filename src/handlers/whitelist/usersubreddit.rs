use axum::extract::{Path, State};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::format::user_subreddit_map;
use crate::error::ApiError;
use crate::handlers::{required, EditForm};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Action, Table};

const NOT_FOUND: &str = "User Subreddit whitelist does not exist";

/// GET /whitelist/usersubreddit - username -> whitelisted subreddits
pub async fn collection_get(State(state): State<AppState>) -> ApiResult<Map<String, Value>> {
    let entries = state.store.user_subreddit_whitelist().await?;
    Ok(ApiResponse::success(user_subreddit_map(entries)))
}

/// POST /whitelist/usersubreddit
pub async fn collection_post(
    State(state): State<AppState>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let username = required(&form.username)?;
    let subreddits = required(&form.subreddits)?;

    if state.store.user_subreddit_whitelist_exists(username).await? {
        return Err(ApiError::conflict("User Subreddit whitelist already exists"));
    }

    let data = state
        .store
        .insert(
            Table::UserSubredditWhitelist,
            &[
                ("username", username.to_string()),
                ("subreddits", subreddits.to_string()),
            ],
        )
        .await?;

    info!("Created subreddit whitelist for {}", username);
    Ok(ApiResponse::with_action(Action::Insert, data))
}

/// GET /whitelist/usersubreddit/:username - single-entry mapping
pub async fn record_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Map<String, Value>> {
    match state.store.user_subreddit_entry(&username).await? {
        Some(entry) => Ok(ApiResponse::success(user_subreddit_map(vec![entry]))),
        None => Err(ApiError::not_found(NOT_FOUND)),
    }
}

/// PUT /whitelist/usersubreddit/:username - replace the subreddits text
pub async fn record_put(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let subreddits = required(&form.subreddits)?;

    if !state.store.user_subreddit_whitelist_exists(&username).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    state
        .store
        .update(
            Table::UserSubredditWhitelist,
            &[("subreddits", subreddits.to_string())],
            &username,
        )
        .await?;

    let mut data = Map::new();
    data.insert("username".into(), Value::String(username.clone()));
    data.insert("subreddits".into(), Value::String(subreddits.to_string()));

    info!("Updated subreddit whitelist for {}", username);
    Ok(ApiResponse::with_action(Action::Update, data))
}

/// DELETE /whitelist/usersubreddit/:username
pub async fn record_delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: EditForm,
) -> ApiResult<()> {
    state.gate.authorize(form.password())?;

    if !state.store.user_subreddit_whitelist_exists(&username).await? {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    state
        .store
        .delete(Table::UserSubredditWhitelist, "username", &username)
        .await?;

    info!("Deleted subreddit whitelist for {}", username);
    Ok(ApiResponse::action_only(Action::Delete))
}
