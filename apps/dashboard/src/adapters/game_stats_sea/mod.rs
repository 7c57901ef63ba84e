//! SeaORM adapter for the game_stats table.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entities::game_stats;

pub mod dto;

pub use dto::GameStatsCreate;

pub async fn find_by_account_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<game_stats::Model>, sea_orm::DbErr> {
    game_stats::Entity::find()
        .filter(game_stats::Column::AccountId.eq(account_id))
        .one(conn)
        .await
}

fn active_model(dto: GameStatsCreate) -> game_stats::ActiveModel {
    let now = time::OffsetDateTime::now_utc();
    game_stats::ActiveModel {
        id: Set(Uuid::new_v4()),
        account_id: Set(dto.account_id),
        eggs: Set(dto.eggs),
        hp: Set(dto.hp),
        max_hp: Set(dto.max_hp),
        mp: Set(dto.mp),
        max_mp: Set(dto.max_mp),
        xp: Set(dto.xp),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

/// Plain insert; an existing row for the account surfaces as a unique violation.
pub async fn create_game_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStatsCreate,
) -> Result<game_stats::Model, sea_orm::DbErr> {
    active_model(dto).insert(conn).await
}

/// Insert or overwrite the counters of the account's row.
pub async fn upsert_game_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameStatsCreate,
) -> Result<game_stats::Model, sea_orm::DbErr> {
    let account_id = dto.account_id;

    game_stats::Entity::insert(active_model(dto))
        .on_conflict(
            OnConflict::column(game_stats::Column::AccountId)
                .update_columns([
                    game_stats::Column::Eggs,
                    game_stats::Column::Hp,
                    game_stats::Column::MaxHp,
                    game_stats::Column::Mp,
                    game_stats::Column::MaxMp,
                    game_stats::Column::Xp,
                    game_stats::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_account_id(conn, account_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("game_stats.account_id not found".into()))
}
