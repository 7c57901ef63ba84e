//! SeaORM adapter for the accounts table.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::accounts;

pub mod dto;

pub use dto::AccountCreate;

pub async fn find_by_auth_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_id: &str,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find()
        .filter(accounts::Column::AuthId.eq(auth_id))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<accounts::Model>, sea_orm::DbErr> {
    accounts::Entity::find_by_id(account_id).one(conn).await
}

/// Plain insert; a taken `auth_id` surfaces as a unique violation.
pub async fn create_account<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: AccountCreate,
) -> Result<accounts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let account = accounts::ActiveModel {
        id: Set(Uuid::new_v4()),
        auth_id: Set(dto.auth_id),
        email: Set(dto.email),
        username: Set(dto.username),
        role: Set(dto.role),
        created_at: Set(now),
        updated_at: Set(now),
        last_login_at: Set(None),
    };

    account.insert(conn).await
}

/// Deletes the account; dependent rows go with it via `ON DELETE CASCADE`.
/// Returns the number of rows removed.
pub async fn delete_by_auth_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_id: &str,
) -> Result<u64, sea_orm::DbErr> {
    let res = accounts::Entity::delete_many()
        .filter(accounts::Column::AuthId.eq(auth_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
