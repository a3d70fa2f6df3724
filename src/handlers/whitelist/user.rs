use axum::extract::{Path, State};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::format::user_list;
use crate::error::ApiError;
use crate::handlers::{required, EditForm};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Action, Table};

use super::Whitelisted;

/// GET /whitelist/user
pub async fn collection_get(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    let entries = state.store.user_whitelist().await?;
    Ok(ApiResponse::success(user_list(entries)))
}

/// POST /whitelist/user
pub async fn collection_post(
    State(state): State<AppState>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let username = required(&form.username)?;
    if state.store.user_whitelist_exists(username).await? {
        return Err(ApiError::conflict("User already whitelisted"));
    }

    let data = state
        .store
        .insert(Table::UserWhitelist, &[("username", username.to_string())])
        .await?;

    info!("Whitelisted user {}", username);
    Ok(ApiResponse::with_action(Action::Insert, data))
}

/// GET /whitelist/user/:username
pub async fn record_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Whitelisted> {
    if state.store.user_whitelist_exists(&username).await? {
        Ok(ApiResponse::success(Whitelisted::YES))
    } else {
        Err(ApiError::not_found("User not in whitelist"))
    }
}

/// DELETE /whitelist/user/:username
pub async fn record_delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: EditForm,
) -> ApiResult<()> {
    state.gate.authorize(form.password())?;

    if !state.store.user_whitelist_exists(&username).await? {
        return Err(ApiError::not_found("User not in whitelist"));
    }

    state
        .store
        .delete(Table::UserWhitelist, "username", &username)
        .await?;

    info!("Removed user {} from whitelist", username);
    Ok(ApiResponse::action_only(Action::Delete))
}
