// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::StoreError;
use crate::types::Action;

/// Client-facing text for every persistence failure
pub const QUERY_ERROR_MESSAGE: &str = "Error during execution of query";

/// Handler error. Every variant renders as an HTTP 200 envelope; callers
/// tell outcomes apart by the body's `status` field alone.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid password")]
    InvalidPassword,

    #[error("Missing fields")]
    MissingFields,

    #[error("Invalid request method")]
    InvalidMethod,

    /// Key already present ("User already exists", "Subreddit already whitelisted", ...)
    #[error("{0}")]
    Conflict(String),

    /// Key absent ("User does not exist", "User not in whitelist", ...)
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    /// `fail` for business rule rejections, `error` for persistence failures
    pub fn status(&self) -> &'static str {
        match self {
            ApiError::Store(_) => "error",
            _ => "fail",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            // Select failures nest their details under `data`; writes keep them flat.
            ApiError::Store(StoreError { action: Action::Select, kind }) => json!({
                "status": "error",
                "data": {
                    "action": Action::Select,
                    "exception": kind,
                    "message": QUERY_ERROR_MESSAGE
                }
            }),
            ApiError::Store(StoreError { action, kind }) => json!({
                "status": "error",
                "action": action,
                "exception": kind,
                "message": QUERY_ERROR_MESSAGE
            }),
            other => json!({
                "status": other.status(),
                "message": other.to_string()
            }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if !matches!(self, ApiError::Store(_)) {
            tracing::debug!("Request rejected: {}", self);
        }
        (StatusCode::OK, Json(self.to_json())).into_response()
    }
}
