use axum::extract::{Path, State};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::format::subreddit_list;
use crate::error::ApiError;
use crate::handlers::{required, EditForm};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Action, Table};

use super::Whitelisted;

/// GET /whitelist/subreddit
pub async fn collection_get(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let entries = state.store.subreddit_whitelist().await?;
    Ok(ApiResponse::success(subreddit_list(entries)))
}

/// POST /whitelist/subreddit
pub async fn collection_post(
    State(state): State<AppState>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let subreddit = required(&form.subreddit)?;
    if state.store.subreddit_whitelist_exists(subreddit).await? {
        return Err(ApiError::conflict("Subreddit already whitelisted"));
    }

    let data = state
        .store
        .insert(Table::SubredditWhitelist, &[("subreddit", subreddit.to_string())])
        .await?;

    info!("Whitelisted subreddit {}", subreddit);
    Ok(ApiResponse::with_action(Action::Insert, data))
}

/// GET /whitelist/subreddit/:name
pub async fn record_get(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Whitelisted> {
    if state.store.subreddit_whitelist_exists(&name).await? {
        Ok(ApiResponse::success(Whitelisted::YES))
    } else {
        Err(ApiError::not_found("Subreddit not in whitelist"))
    }
}

/// DELETE /whitelist/subreddit/:name
pub async fn record_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
    form: EditForm,
) -> ApiResult<()> {
    state.gate.authorize(form.password())?;

    if !state.store.subreddit_whitelist_exists(&name).await? {
        return Err(ApiError::not_found("Subreddit not in whitelist"));
    }

    state
        .store
        .delete(Table::SubredditWhitelist, "subreddit", &name)
        .await?;

    info!("Removed subreddit {} from whitelist", name);
    Ok(ApiResponse::action_only(Action::Delete))
}
