//! GameStats repository functions.

use sea_orm::ConnectionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::adapters::game_stats_sea as game_stats_adapter;
use crate::errors::domain::DomainError;

/// Per-account game counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameStats {
    pub id: Uuid,
    pub account_id: Uuid,
    pub eggs: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub xp: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

/// Counter values written when a row is created.
///
/// `Default` gives the starting values of a fresh player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameStatsDefaults {
    pub eggs: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub xp: i64,
}

impl Default for GameStatsDefaults {
    fn default() -> Self {
        Self {
            eggs: 0,
            hp: 100,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
            xp: 0,
        }
    }
}

impl GameStatsDefaults {
    fn into_dto(self, account_id: Uuid) -> game_stats_adapter::GameStatsCreate {
        game_stats_adapter::GameStatsCreate {
            account_id,
            eggs: self.eggs,
            hp: self.hp,
            max_hp: self.max_hp,
            mp: self.mp,
            max_mp: self.max_mp,
            xp: self.xp,
        }
    }
}

pub async fn find_by_account_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
) -> Result<Option<GameStats>, DomainError> {
    let stats = game_stats_adapter::find_by_account_id(conn, account_id).await?;
    Ok(stats.map(GameStats::from))
}

pub async fn create_game_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
    values: GameStatsDefaults,
) -> Result<GameStats, DomainError> {
    let stats = game_stats_adapter::create_game_stats(conn, values.into_dto(account_id)).await?;
    Ok(GameStats::from(stats))
}

/// Insert, or overwrite the counters of an existing row.
pub async fn upsert_game_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    account_id: Uuid,
    values: GameStatsDefaults,
) -> Result<GameStats, DomainError> {
    let stats = game_stats_adapter::upsert_game_stats(conn, values.into_dto(account_id)).await?;
    Ok(GameStats::from(stats))
}

impl From<crate::entities::game_stats::Model> for GameStats {
    fn from(model: crate::entities::game_stats::Model) -> Self {
        Self {
            id: model.id,
            account_id: model.account_id,
            eggs: model.eggs,
            hp: model.hp,
            max_hp: model.max_hp,
            mp: model.mp,
            max_mp: model.max_mp,
            xp: model.xp,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
