use std::sync::Arc;

use db_infra::{bootstrap_db, DbKind, RuntimeEnv};

use crate::error::AppError;
use crate::services::store::ProfileStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

enum Backing {
    Database(DbKind),
    Store(Arc<dyn ProfileStore>),
}

/// Builds `AppState` for the server binary and for tests.
pub struct StateBuilder {
    env: RuntimeEnv,
    security: Option<SecurityConfig>,
    backing: Option<Backing>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            security: None,
            backing: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    /// Connect to (and migrate) a database of this kind on `build`.
    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.backing = Some(Backing::Database(kind));
        self
    }

    /// Serve profiles from `store` instead of a database.
    pub fn with_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.backing = Some(Backing::Store(store));
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("security config is required"))?;

        match self.backing {
            Some(Backing::Database(kind)) => {
                let conn = bootstrap_db(self.env, kind).await?;
                Ok(AppState::new(conn, security))
            }
            Some(Backing::Store(store)) => Ok(AppState::with_store(store, security)),
            None => Err(AppError::config(
                "a database or profile store is required",
            )),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
