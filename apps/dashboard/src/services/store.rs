//! The seam between profile provisioning and the backing store.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos::{
    accounts, game_stats, wallets, Account, GameStats, GameStatsDefaults, NewAccount, Wallet,
    WalletDefaults,
};

/// Row-level operations the provisioning sequence needs.
///
/// A missing row is `Ok(None)`. A duplicate insert is `Err(DomainError::Conflict(..))`.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_account_by_auth_id(&self, auth_id: &str)
        -> Result<Option<Account>, DomainError>;

    async fn create_account(&self, new: NewAccount) -> Result<Account, DomainError>;

    async fn find_game_stats(&self, account_id: Uuid) -> Result<Option<GameStats>, DomainError>;

    async fn create_game_stats(
        &self,
        account_id: Uuid,
        values: GameStatsDefaults,
    ) -> Result<GameStats, DomainError>;

    async fn find_wallet(&self, account_id: Uuid) -> Result<Option<Wallet>, DomainError>;

    async fn create_wallet(
        &self,
        account_id: Uuid,
        values: WalletDefaults,
    ) -> Result<Wallet, DomainError>;
}

/// `ProfileStore` over a sea-orm connection pool.
#[derive(Debug, Clone)]
pub struct SeaProfileStore {
    conn: DatabaseConnection,
}

impl SeaProfileStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }
}

#[async_trait]
impl ProfileStore for SeaProfileStore {
    async fn find_account_by_auth_id(
        &self,
        auth_id: &str,
    ) -> Result<Option<Account>, DomainError> {
        accounts::find_by_auth_id(&self.conn, auth_id).await
    }

    async fn create_account(&self, new: NewAccount) -> Result<Account, DomainError> {
        accounts::create_account(&self.conn, new).await
    }

    async fn find_game_stats(&self, account_id: Uuid) -> Result<Option<GameStats>, DomainError> {
        game_stats::find_by_account_id(&self.conn, account_id).await
    }

    async fn create_game_stats(
        &self,
        account_id: Uuid,
        values: GameStatsDefaults,
    ) -> Result<GameStats, DomainError> {
        game_stats::create_game_stats(&self.conn, account_id, values).await
    }

    async fn find_wallet(&self, account_id: Uuid) -> Result<Option<Wallet>, DomainError> {
        wallets::find_by_account_id(&self.conn, account_id).await
    }

    async fn create_wallet(
        &self,
        account_id: Uuid,
        values: WalletDefaults,
    ) -> Result<Wallet, DomainError> {
        wallets::create_wallet(&self.conn, account_id, values).await
    }
}
