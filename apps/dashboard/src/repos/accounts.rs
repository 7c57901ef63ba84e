//! Account repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::adapters::accounts_sea as accounts_adapter;
pub use crate::entities::accounts::AccountRole;
use crate::errors::domain::DomainError;

/// Account domain model: one per authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: Uuid,
    pub auth_id: String,
    pub email: String,
    pub username: Option<String>,
    pub role: AccountRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<time::OffsetDateTime>,
}

/// Input for provisioning a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub auth_id: String,
    pub email: String,
}

impl NewAccount {
    pub fn new(auth_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            auth_id: auth_id.into(),
            email: email.into(),
        }
    }
}

/// Trim, NFKC-normalize and lowercase an email before it is stored.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

pub async fn find_by_auth_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_id: &str,
) -> Result<Option<Account>, DomainError> {
    let account = accounts_adapter::find_by_auth_id(conn, auth_id).await?;
    Ok(account.map(Account::from))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<Account>, DomainError> {
    let account = accounts_adapter::find_by_id(conn, account_id).await?;
    Ok(account.map(Account::from))
}

/// New accounts always start as `player`.
pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewAccount,
) -> Result<Account, DomainError> {
    let dto = accounts_adapter::AccountCreate::new(new.auth_id, normalize_email(&new.email));
    let account = accounts_adapter::create_account(conn, dto).await?;
    Ok(Account::from(account))
}

pub async fn delete_by_auth_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_id: &str,
) -> Result<bool, DomainError> {
    let removed = accounts_adapter::delete_by_auth_id(conn, auth_id).await?;
    Ok(removed > 0)
}

impl From<crate::entities::accounts::Model> for Account {
    fn from(model: crate::entities::accounts::Model) -> Self {
        Self {
            id: model.id,
            auth_id: model.auth_id,
            email: model.email,
            username: model.username,
            role: model.role,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_login_at: model.last_login_at,
        }
    }
}
