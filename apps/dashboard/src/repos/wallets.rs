//! Wallet repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::wallets_sea as wallets_adapter;
use crate::errors::domain::DomainError;

/// Per-account currency balances.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallet {
    pub id: Uuid,
    pub account_id: Uuid,
    pub coins: i64,
    pub gems: i64,
    pub stars: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// Balances written when a wallet is created; all zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalletDefaults {
    pub coins: i64,
    pub gems: i64,
    pub stars: i64,
}

impl WalletDefaults {
    fn into_dto(self, account_id: Uuid) -> wallets_adapter::WalletCreate {
        wallets_adapter::WalletCreate {
            account_id,
            coins: self.coins,
            gems: self.gems,
            stars: self.stars,
        }
    }
}

pub async fn find_by_account_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<Wallet>, DomainError> {
    let wallet = wallets_adapter::find_by_account_id(conn, account_id).await?;
    Ok(wallet.map(Wallet::from))
}

pub async fn create_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
    values: WalletDefaults,
) -> Result<Wallet, DomainError> {
    let wallet = wallets_adapter::create_wallet(conn, values.into_dto(account_id)).await?;
    Ok(Wallet::from(wallet))
}

pub async fn upsert_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
    values: WalletDefaults,
) -> Result<Wallet, DomainError> {
    let wallet = wallets_adapter::upsert_wallet(conn, values.into_dto(account_id)).await?;
    Ok(Wallet::from(wallet))
}

impl From<crate::entities::wallets::Model> for Wallet {
    fn from(model: crate::entities::wallets::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            coins: model.coins,
            gems: model.gems,
            stars: model.stars,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
