use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::services::profiles::ProfileService;
use crate::services::store::{ProfileStore, SeaProfileStore};

/// Shared resources handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub profiles: ProfileService,
}

impl AppState {
    /// Profiles are served from `db`.
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let store = SeaProfileStore::new(db.clone());
        Self {
            db: Some(db),
            security,
            profiles: ProfileService::new(Arc::new(store)),
        }
    }

    /// Profiles are served from an arbitrary store; no database is attached.
    pub fn with_store(store: Arc<dyn ProfileStore>, security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            profiles: ProfileService::new(store),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
