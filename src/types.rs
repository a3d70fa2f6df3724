/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Statement kinds reported in response envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Select,
    Insert,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Select => "SELECT",
            Action::Insert => "INSERT",
            Action::Update => "UPDATE",
            Action::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four persisted tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    SubredditWhitelist,
    UserWhitelist,
    UserSubredditWhitelist,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::SubredditWhitelist => "whitelist_subreddits",
            Table::UserWhitelist => "whitelist_users",
            Table::UserSubredditWhitelist => "whitelist_usersubreddits",
        }
    }

    /// Unique key column
    pub fn key(&self) -> &'static str {
        match self {
            Table::SubredditWhitelist => "subreddit",
            Table::Users | Table::UserWhitelist | Table::UserSubredditWhitelist => "username",
        }
    }
}
