use axum::extract::{Path, State};
use serde_json::{Map, Value};
use tracing::info;

use crate::api::format::{get_all_users, timestamp};
use crate::database::escape::escape_content;
use crate::database::models::UserRecord;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::types::{Action, Table};

use super::{required, EditForm};

/// GET /users - every user record keyed by username
pub async fn collection_get(State(state): State<AppState>) -> ApiResult<Map<String, Value>> {
    Ok(ApiResponse::success(get_all_users(&state.store).await?))
}

/// POST /users - create a user record
pub async fn collection_post(
    State(state): State<AppState>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let username = required(&form.username)?;
    let subreddit = required(&form.subreddit)?;
    let kind = required(&form.kind)?;
    let content = required(&form.content)?;

    if state.store.user_exists(username).await? {
        return Err(ApiError::conflict("User already exists"));
    }

    let date = timestamp();
    let mut data = state
        .store
        .insert(
            Table::Users,
            &[
                ("username", username.to_string()),
                ("subreddit", subreddit.to_string()),
                ("type", kind.to_string()),
                ("content", escape_content(content)),
                ("date", date),
            ],
        )
        .await?;
    // Echo the submitted text rather than its stored form
    data.insert("content".into(), Value::String(content.to_string()));

    info!("Created user record for {} in {}", username, subreddit);
    Ok(ApiResponse::with_action(Action::Insert, data))
}

/// GET /users/:username
pub async fn record_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserRecord> {
    match state.store.user(&username).await? {
        Some(record) => Ok(ApiResponse::success(record)),
        None => Err(ApiError::not_found("User does not exist")),
    }
}

/// PUT /users/:username - replace subreddit, type and content; restamps the date
pub async fn record_put(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: EditForm,
) -> ApiResult<Map<String, Value>> {
    state.gate.authorize(form.password())?;

    let subreddit = required(&form.subreddit)?;
    let kind = required(&form.kind)?;
    let content = required(&form.content)?;

    if !state.store.user_exists(&username).await? {
        return Err(ApiError::not_found("User does not exist"));
    }

    let date = timestamp();
    state
        .store
        .update(
            Table::Users,
            &[
                ("subreddit", subreddit.to_string()),
                ("type", kind.to_string()),
                ("content", escape_content(content)),
                ("date", date.clone()),
            ],
            &username,
        )
        .await?;

    // Mirror the submitted username, falling back to the path key
    let echoed = form
        .username
        .as_deref()
        .filter(|u| !u.is_empty())
        .unwrap_or(username.as_str());

    let mut data = Map::new();
    data.insert("username".into(), Value::String(echoed.to_string()));
    data.insert("subreddit".into(), Value::String(subreddit.to_string()));
    data.insert("type".into(), Value::String(kind.to_string()));
    data.insert("content".into(), Value::String(content.to_string()));
    data.insert("date".into(), Value::String(date));

    info!("Updated user record for {}", username);
    Ok(ApiResponse::with_action(Action::Update, data))
}

/// DELETE /users/:username
pub async fn record_delete(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: EditForm,
) -> ApiResult<()> {
    state.gate.authorize(form.password())?;

    if !state.store.user_exists(&username).await? {
        return Err(ApiError::not_found("User does not exist"));
    }

    state.store.delete(Table::Users, "username", &username).await?;

    info!("Deleted user record for {}", username);
    Ok(ApiResponse::action_only(Action::Delete))
}
