use dashboard::entities::{Accounts, GameStatsTable, Wallets};
use db_infra::{bootstrap_db, DbKind, RuntimeEnv};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn memory_db() -> DatabaseConnection {
    bootstrap_db(RuntimeEnv::Test, DbKind::SqliteMemory)
        .await
        .expect("bootstrap in-memory sqlite")
}

/// Row counts of (accounts, game_stats, wallets).
pub async fn row_counts(conn: &DatabaseConnection) -> (u64, u64, u64) {
    let accounts = Accounts::find().count(conn).await.expect("count accounts");
    let stats = GameStatsTable::find().count(conn).await.expect("count stats");
    let wallets = Wallets::find().count(conn).await.expect("count wallets");
    (accounts, stats, wallets)
}
