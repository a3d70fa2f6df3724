use serde_json::{Map, Value};
use sqlx::any::AnyRow;
use sqlx::{AnyPool, FromRow};
use thiserror::Error;

use crate::database::models::{
    SubredditWhitelistEntry, UserRecord, UserSubredditWhitelistEntry, UserWhitelistEntry,
};
use crate::types::{Action, Table};

/// A failed statement, classified by driver error kind only.
/// The driver's message is logged where the error is raised and never kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{action} failed with {kind}")]
pub struct StoreError {
    pub action: Action,
    pub kind: &'static str,
}

impl StoreError {
    pub fn from_sqlx(action: Action, err: sqlx::Error) -> Self {
        let kind = kind_name(&err);
        tracing::error!("{} query failed ({}): {}", action, kind, err);
        Self { action, kind }
    }
}

fn kind_name(err: &sqlx::Error) -> &'static str {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => "UniqueViolation",
        sqlx::Error::Database(_) => "Database",
        sqlx::Error::Configuration(_) => "Configuration",
        sqlx::Error::Io(_) => "Io",
        sqlx::Error::Tls(_) => "Tls",
        sqlx::Error::Protocol(_) => "Protocol",
        sqlx::Error::RowNotFound => "RowNotFound",
        sqlx::Error::TypeNotFound { .. } => "TypeNotFound",
        sqlx::Error::ColumnIndexOutOfBounds { .. } => "ColumnIndexOutOfBounds",
        sqlx::Error::ColumnNotFound(_) => "ColumnNotFound",
        sqlx::Error::ColumnDecode { .. } => "ColumnDecode",
        sqlx::Error::Decode(_) => "Decode",
        sqlx::Error::PoolTimedOut => "PoolTimedOut",
        sqlx::Error::PoolClosed => "PoolClosed",
        sqlx::Error::WorkerCrashed => "WorkerCrashed",
        _ => "Other",
    }
}

// MySQL reports TEXT columns as blobs, which the Any driver will not decode
// into String. The cast yields a character type on MySQL and SQLite alike.
pub(crate) const USER_COLUMNS: &str =
    "username, subreddit, type, CAST(content AS CHAR) AS content, date";
pub(crate) const USER_SUBREDDIT_COLUMNS: &str = "username, CAST(subreddits AS CHAR) AS subreddits";

/// Result of a select: a lone row is unwrapped, anything else stays a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selected<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Selected<T> {
    fn from_rows(mut rows: Vec<T>) -> Self {
        if rows.len() == 1 {
            Selected::One(rows.remove(0))
        } else {
            Selected::Many(rows)
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            Selected::One(row) => vec![row],
            Selected::Many(rows) => rows,
        }
    }

    /// First row, for single-key lookups
    pub fn into_one(self) -> Option<T> {
        match self {
            Selected::One(row) => Some(row),
            Selected::Many(rows) => rows.into_iter().next(),
        }
    }
}

/// Persistence accessor over the four tables.
///
/// Every statement borrows a pooled connection for its own duration only;
/// the connection goes back to the pool when the future completes or is
/// dropped, whichever path the caller takes.
#[derive(Clone)]
pub struct Store {
    pool: AnyPool,
}

impl Store {
    pub fn new(pool: AnyPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn select<T>(&self, query: &str, params: &[&str]) -> Result<Selected<T>, StoreError>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let mut q = sqlx::query_as::<_, T>(query);
        for p in params {
            q = q.bind(p.to_string());
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(Action::Select, e))?;
        Ok(Selected::from_rows(rows))
    }

    pub async fn count(&self, query: &str, params: &[&str]) -> Result<i64, StoreError> {
        let mut q = sqlx::query_scalar::<_, i64>(query);
        for p in params {
            q = q.bind(p.to_string());
        }
        q.fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_sqlx(Action::Select, e))
    }

    /// Inserts one row and returns the written `{field: value}` pairs.
    pub async fn insert(
        &self,
        table: Table,
        fields: &[(&'static str, String)],
    ) -> Result<Map<String, Value>, StoreError> {
        let columns: Vec<&str> = fields.iter().map(|(f, _)| *f).collect();
        let placeholders = vec!["?"; fields.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table.name(),
            columns.join(", "),
            placeholders
        );

        let values = fields.iter().map(|(_, v)| v.clone()).collect();
        self.execute(Action::Insert, &sql, values).await?;

        Ok(fields
            .iter()
            .map(|(f, v)| (f.to_string(), Value::String(v.clone())))
            .collect())
    }

    /// Updates the row keyed by `key` and returns the written pairs.
    pub async fn update(
        &self,
        table: Table,
        fields: &[(&'static str, String)],
        key: &str,
    ) -> Result<Map<String, Value>, StoreError> {
        let assignments: Vec<String> = fields.iter().map(|(f, _)| format!("{} = ?", f)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ?",
            table.name(),
            assignments.join(", "),
            table.key()
        );

        let mut values: Vec<String> = fields.iter().map(|(_, v)| v.clone()).collect();
        values.push(key.to_string());
        self.execute(Action::Update, &sql, values).await?;

        Ok(fields
            .iter()
            .map(|(f, v)| (f.to_string(), Value::String(v.clone())))
            .collect())
    }

    pub async fn delete(&self, table: Table, field: &'static str, value: &str) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE {} = ?", table.name(), field);
        self.execute(Action::Delete, &sql, vec![value.to_string()]).await?;
        Ok(())
    }

    /// Runs a write inside a transaction; an uncommitted transaction rolls back on drop.
    async fn execute(&self, action: Action, sql: &str, values: Vec<String>) -> Result<u64, StoreError> {
        let fail = |e: sqlx::Error| StoreError::from_sqlx(action, e);

        let mut tx = self.pool.begin().await.map_err(fail)?;
        let mut q = sqlx::query(sql);
        for v in values {
            q = q.bind(v);
        }
        let result = q.execute(&mut *tx).await.map_err(fail)?;
        tx.commit().await.map_err(fail)?;

        Ok(result.rows_affected())
    }

    async fn exists(&self, table: Table, key: &str) -> Result<bool, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = ?", table.name(), table.key());
        Ok(self.count(&sql, &[key]).await? >= 1)
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool, StoreError> {
        self.exists(Table::Users, username).await
    }

    pub async fn subreddit_whitelist_exists(&self, subreddit: &str) -> Result<bool, StoreError> {
        self.exists(Table::SubredditWhitelist, subreddit).await
    }

    pub async fn user_whitelist_exists(&self, username: &str) -> Result<bool, StoreError> {
        self.exists(Table::UserWhitelist, username).await
    }

    pub async fn user_subreddit_whitelist_exists(&self, username: &str) -> Result<bool, StoreError> {
        self.exists(Table::UserSubredditWhitelist, username).await
    }

    pub async fn users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = self
            .select::<UserRecord>(&format!("SELECT {} FROM users", USER_COLUMNS), &[])
            .await?;
        Ok(rows.into_vec().into_iter().map(UserRecord::decoded).collect())
    }

    pub async fn user(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let rows = self
            .select::<UserRecord>(
                &format!("SELECT {} FROM users WHERE username = ?", USER_COLUMNS),
                &[username],
            )
            .await?;
        Ok(rows.into_one().map(UserRecord::decoded))
    }

    pub async fn subreddit_whitelist(&self) -> Result<Vec<SubredditWhitelistEntry>, StoreError> {
        let rows = self
            .select("SELECT subreddit FROM whitelist_subreddits", &[])
            .await?;
        Ok(rows.into_vec())
    }

    pub async fn user_whitelist(&self) -> Result<Vec<UserWhitelistEntry>, StoreError> {
        let rows = self.select("SELECT username FROM whitelist_users", &[]).await?;
        Ok(rows.into_vec())
    }

    pub async fn user_subreddit_whitelist(&self) -> Result<Vec<UserSubredditWhitelistEntry>, StoreError> {
        let rows = self
            .select(
                &format!("SELECT {} FROM whitelist_usersubreddits", USER_SUBREDDIT_COLUMNS),
                &[],
            )
            .await?;
        Ok(rows.into_vec())
    }

    pub async fn user_subreddit_entry(
        &self,
        username: &str,
    ) -> Result<Option<UserSubredditWhitelistEntry>, StoreError> {
        let rows = self
            .select(
                &format!(
                    "SELECT {} FROM whitelist_usersubreddits WHERE username = ?",
                    USER_SUBREDDIT_COLUMNS
                ),
                &[username],
            )
            .await?;
        Ok(rows.into_one())
    }
}
