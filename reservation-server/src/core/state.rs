//! Server State
//!
//! Shared by every request handler via axum's `State` extractor.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::core::{Config, Result};
use crate::db::DbService;

/// Server state (cheap to clone)
///
/// # Example
///
/// ```ignore
/// let state = ServerState::initialize(&config).await?;
/// let rows = reservation::find_all(state.pool()).await?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self { config, db }
    }

    /// Open the configured database, apply migrations, and build the state
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        tracing::info!(
            timezone = %config.timezone,
            environment = %config.environment,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// Business timezone
    pub fn timezone(&self) -> Tz {
        self.config.timezone
    }

    /// Current wall-clock time in the business timezone
    pub fn now(&self) -> NaiveDateTime {
        shared::time::local_now(self.config.timezone)
    }
}
