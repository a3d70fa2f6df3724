use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::database::models::{
    SubredditWhitelistEntry, UserRecord, UserSubredditWhitelistEntry, UserWhitelistEntry,
};
use crate::database::{Store, StoreError};

/// Wire format of the submission timestamp, e.g. `03/14/2024 09:26:53 AM`
pub const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S %p";

/// Server-side timestamp stamped on every user create and update
pub fn timestamp() -> String {
    format_timestamp(Local::now().naive_local())
}

pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// A user record without its key, as listed under `/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub subreddit: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub date: String,
}

impl From<UserRecord> for UserSummary {
    fn from(record: UserRecord) -> Self {
        Self {
            subreddit: record.subreddit,
            kind: record.kind,
            content: record.content,
            date: record.date,
        }
    }
}

/// Members of one subreddit, as returned by `/subreddits/:name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubredditMembers {
    pub name: String,
    pub count: usize,
    pub users: Vec<String>,
}

/// Every user record keyed by username, in row order
pub async fn get_all_users(store: &Store) -> Result<Map<String, Value>, StoreError> {
    Ok(index_users(store.users().await?))
}

pub fn index_users(records: Vec<UserRecord>) -> Map<String, Value> {
    let mut users = Map::new();
    for record in records {
        let username = record.username.clone();
        let summary = UserSummary::from(record);
        users.insert(
            username,
            serde_json::to_value(summary).unwrap_or(Value::Null),
        );
    }
    users
}

/// Usernames grouped by subreddit. Both levels keep the iteration order of `users`.
pub fn subreddits_index(users: &Map<String, Value>) -> Map<String, Value> {
    let mut index = Map::new();
    for (username, entry) in users {
        let Some(subreddit) = entry.get("subreddit").and_then(Value::as_str) else {
            continue;
        };
        let members = index
            .entry(subreddit.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(list) = members {
            list.push(Value::String(username.clone()));
        }
    }
    index
}

/// Users whose subreddit matches `name`, ignoring case
pub fn single_subreddit(name: &str, users: &Map<String, Value>) -> SubredditMembers {
    let wanted = name.to_lowercase();
    let members: Vec<String> = users
        .iter()
        .filter(|(_, entry)| {
            entry
                .get("subreddit")
                .and_then(Value::as_str)
                .is_some_and(|s| s.to_lowercase() == wanted)
        })
        .map(|(username, _)| username.clone())
        .collect();

    SubredditMembers {
        name: name.to_string(),
        count: members.len(),
        users: members,
    }
}

pub fn subreddit_list(entries: Vec<SubredditWhitelistEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.subreddit).collect()
}

pub fn user_list(entries: Vec<UserWhitelistEntry>) -> Vec<String> {
    entries.into_iter().map(|e| e.username).collect()
}

/// username -> whitelisted subreddits text
pub fn user_subreddit_map(entries: Vec<UserSubredditWhitelistEntry>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|e| (e.username, Value::String(e.subreddits)))
        .collect()
}
