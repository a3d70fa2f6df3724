use std::sync::Arc;

use crate::auth::AuthGate;
use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, Store};

/// Shared by every handler; built once at startup and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Store,
    pub gate: AuthGate,
}

impl AppState {
    pub fn new(config: AppConfig, store: Store) -> Self {
        let gate = AuthGate::new(config.security.edit_password.as_str());
        Self {
            config: Arc::new(config),
            store,
            gate,
        }
    }

    /// Connects the pool described by `config` and bootstraps the schema when enabled.
    pub async fn connect(config: AppConfig) -> Result<Self, DatabaseError> {
        let pool = DatabaseManager::connect(&config.database).await?;
        if config.database.bootstrap_schema {
            DatabaseManager::bootstrap_schema(&pool).await?;
        }
        Ok(Self::new(config, Store::new(pool)))
    }
}
