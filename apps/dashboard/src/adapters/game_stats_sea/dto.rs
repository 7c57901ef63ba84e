//! DTOs for game_stats_sea adapter.

use uuid::Uuid;

/// DTO for inserting (or upserting) a game_stats row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatsCreate {
    pub account_id: Uuid,
    pub eggs: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub xp: i64,
}
