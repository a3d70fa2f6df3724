// handlers/mod.rs - route handlers, one module per resource
//
// Reads are public. Every POST/PUT/DELETE passes the shared-password gate
// before touching the store.

pub mod subreddits;
pub mod users;
pub mod whitelist;

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};
use serde::Deserialize;
use tracing::warn;

use crate::error::ApiError;

/// Form-encoded fields accepted by every mutating route.
/// Each route reads the subset it needs.
#[derive(Debug, Default, Deserialize)]
pub struct EditForm {
    pub username: Option<String>,
    pub subreddit: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub content: Option<String>,
    pub subreddits: Option<String>,
    pub password: Option<String>,
}

impl EditForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, String> {
        let mut form = EditForm::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| e.body_text())? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(|e| e.body_text())?;
            form.set(&name, value);
        }
        Ok(form)
    }

    fn set(&mut self, name: &str, value: String) {
        let slot = match name {
            "username" => &mut self.username,
            "subreddit" => &mut self.subreddit,
            "type" => &mut self.kind,
            "content" => &mut self.content,
            "subreddits" => &mut self.subreddits,
            "password" => &mut self.password,
            _ => return,
        };
        *slot = Some(value);
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Reads urlencoded and multipart bodies alike. A missing or unreadable
/// body behaves like an empty form.
#[async_trait]
impl<S> FromRequest<S> for EditForm
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);

        let parsed = match content_type.as_deref() {
            None => return Ok(EditForm::default()),
            Some(ct) if ct.starts_with("multipart/form-data") => {
                match Multipart::from_request(req, state).await {
                    Ok(multipart) => Self::from_multipart(multipart).await,
                    Err(rejection) => Err(rejection.body_text()),
                }
            }
            Some(_) => Form::<EditForm>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| rejection.body_text()),
        };

        Ok(parsed.unwrap_or_else(|reason| {
            warn!("Unreadable form body treated as empty: {}", reason);
            EditForm::default()
        }))
    }
}

/// Non-empty value of a required field
pub fn required(field: &Option<String>) -> Result<&str, ApiError> {
    match field.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::MissingFields),
    }
}

/// Fallback for verbs a route does not wire
pub async fn invalid_method() -> ApiError {
    ApiError::InvalidMethod
}
