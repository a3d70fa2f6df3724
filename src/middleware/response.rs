use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::types::Action;

/// Success envelope: `{status: "success", action?, data?}`
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub action: Option<Action>,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Read response: `{status, data}`
    pub fn success(data: T) -> Self {
        Self {
            action: None,
            data: Some(data),
        }
    }

    /// Write response carrying the written fields: `{status, action, data}`
    pub fn with_action(action: Action, data: T) -> Self {
        Self {
            action: Some(action),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Write response with nothing to echo back, e.g. deletes
    pub fn action_only(action: Action) -> Self {
        Self { action: Some(action), data: None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let mut envelope = Map::new();
        envelope.insert("status".into(), Value::from("success"));

        if let Some(action) = self.action {
            envelope.insert("action".into(), Value::from(action.as_str()));
        }

        if let Some(data) = &self.data {
            match serde_json::to_value(data) {
                Ok(value) => {
                    envelope.insert("data".into(), value);
                }
                Err(e) => {
                    tracing::error!("Failed to serialize response data: {}", e);
                    return (
                        StatusCode::OK,
                        Json(json!({
                            "status": "error",
                            "message": "Failed to serialize response data"
                        })),
                    )
                        .into_response();
                }
            }
        }

        (StatusCode::OK, Json(Value::Object(envelope))).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
