use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SubredditWhitelistEntry {
    pub subreddit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserWhitelistEntry {
    pub username: String,
}

/// Free-text list of subreddits a user is allowed to post in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSubredditWhitelistEntry {
    pub username: String,
    pub subreddits: String,
}
