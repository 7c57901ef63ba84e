//! SeaORM adapter for the wallets table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::wallets;

pub mod dto;

pub use dto::WalletCreate;

pub async fn find_by_account_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<wallets::Model>, sea_orm::DbErr> {
    wallets::Entity::find()
        .filter(wallets::Column::AccountId.eq(account_id))
        .one(conn)
        .await
}

fn active_model(dto: WalletCreate) -> wallets::ActiveModel {
    let now = time::OffsetDateTime::now_utc();
    wallets::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(dto.account_id),
        coins: Set(dto.coins),
        gems: Set(dto.gems),
        stars: Set(dto.stars),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

pub async fn create_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WalletCreate,
) -> Result<wallets::Model, sea_orm::DbErr> {
    active_model(dto).insert(conn).await
}

pub async fn upsert_wallet<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: WalletCreate,
) -> Result<wallets::Model, sea_orm::DbErr> {
    let account_id = dto.account_id;

    wallets::Entity::insert(active_model(dto))
        .on_conflict(
            OnConflict::column(wallets::Column::AccountId)
                .update_columns([
                    wallets::Column::Coins,
                    wallets::Column::Gems,
                    wallets::Column::Stars,
                    wallets::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_account_id(conn, account_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("wallets.account_id not found".into()))
}
