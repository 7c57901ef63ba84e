use dashboard::adapters::accounts_sea::{self, AccountCreate};
use dashboard::adapters::game_stats_sea::{self, GameStatsCreate};
use dashboard::adapters::wallets_sea::{self, WalletCreate};
use test_support::unique_auth_id;
use uuid::Uuid;

use crate::support::db::memory_db;

async fn new_account(conn: &sea_orm::DatabaseConnection) -> Uuid {
    accounts_sea::create_account(conn, AccountCreate::new(unique_auth_id(), ""))
        .await
        .unwrap()
        .id
}

fn stats(account_id: Uuid, hp: i32) -> GameStatsCreate {
    GameStatsCreate {
        account_id,
        eggs: 1,
        hp,
        max_hp: 100,
        mp: 50,
        max_mp: 50,
        xp: 10,
    }
}

#[tokio::test]
async fn test_game_stats_upsert_overwrites_in_place() {
    let conn = memory_db().await;
    let account_id = new_account(&conn).await;

    let created = game_stats_sea::create_game_stats(&conn, stats(account_id, 100))
        .await
        .unwrap();
    let updated = game_stats_sea::upsert_game_stats(&conn, stats(account_id, 33))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.hp, 33);
}

#[tokio::test]
async fn test_game_stats_upsert_inserts_when_missing() {
    let conn = memory_db().await;
    let account_id = new_account(&conn).await;

    let row = game_stats_sea::upsert_game_stats(&conn, stats(account_id, 70))
        .await
        .unwrap();

    assert_eq!(row.account_id, account_id);
    assert_eq!(row.hp, 70);
    let found = game_stats_sea::find_by_account_id(&conn, account_id)
        .await
        .unwrap();
    assert_eq!(found.map(|s| s.id), Some(row.id));
}

#[tokio::test]
async fn test_wallet_upsert_overwrites_balances() {
    let conn = memory_db().await;
    let account_id = new_account(&conn).await;

    let created = wallets_sea::create_wallet(
        &conn,
        WalletCreate {
            account_id,
            coins: 0,
            gems: 0,
            stars: 0,
        },
    )
    .await
    .unwrap();
    let updated = wallets_sea::upsert_wallet(
        &conn,
        WalletCreate {
            account_id,
            coins: 5,
            gems: 6,
            stars: 7,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!((updated.coins, updated.gems, updated.stars), (5, 6, 7));
}

#[tokio::test]
async fn test_deleting_account_cascades_to_balances() {
    let conn = memory_db().await;
    let auth_id = unique_auth_id();
    let account_id = accounts_sea::create_account(&conn, AccountCreate::new(auth_id.clone(), ""))
        .await
        .unwrap()
        .id;
    game_stats_sea::create_game_stats(&conn, stats(account_id, 100))
        .await
        .unwrap();
    wallets_sea::create_wallet(
        &conn,
        WalletCreate {
            account_id,
            coins: 1,
            gems: 1,
            stars: 1,
        },
    )
    .await
    .unwrap();

    accounts_sea::delete_by_auth_id(&conn, &auth_id).await.unwrap();

    assert!(game_stats_sea::find_by_account_id(&conn, account_id)
        .await
        .unwrap()
        .is_none());
    assert!(wallets_sea::find_by_account_id(&conn, account_id)
        .await
        .unwrap()
        .is_none());
}
