use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::database::escape::unescape_content;

/// One "found" submission per username
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub username: String,
    pub subreddit: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub content: String,
    pub date: String,
}

impl UserRecord {
    /// Rows hold escaped content; callers outside the store see the decoded text.
    pub fn decoded(mut self) -> Self {
        self.content = unescape_content(&self.content);
        self
    }
}
