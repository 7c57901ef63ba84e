use std::sync::Arc;

use dashboard::repos::wallets;
use dashboard::services::seed::{clear_player, seed_player, SeedPlayer, SEED_GAME_STATS, SEED_WALLET};
use dashboard::{ProfileService, SeaProfileStore, SessionUser};
use test_support::{unique_auth_id, unique_email};

use crate::support::db::{memory_db, row_counts};

fn player() -> SeedPlayer {
    SeedPlayer {
        auth_id: unique_auth_id(),
        email: unique_email("seed"),
    }
}

#[tokio::test]
async fn test_seed_writes_stocked_wallet_and_stats() {
    let conn = memory_db().await;

    let profile = seed_player(&conn, player()).await.unwrap();

    let wallet = profile.wallet.expect("wallet");
    assert_eq!(
        (wallet.coins, wallet.gems, wallet.stars),
        (SEED_WALLET.coins, SEED_WALLET.gems, SEED_WALLET.stars)
    );
    assert_eq!((wallet.coins, wallet.gems, wallet.stars), (1000, 50, 10));

    let stats = profile.game_stats.expect("stats");
    assert_eq!(
        (stats.eggs, stats.hp, stats.max_hp, stats.mp, stats.max_mp, stats.xp),
        (3, 85, 100, 40, 50, 250)
    );
    assert_eq!(stats.hp, SEED_GAME_STATS.hp);
}

#[tokio::test]
async fn test_seed_is_idempotent_and_overwrites_existing_rows() {
    let conn = memory_db().await;
    let seed = player();

    // a real login first provisions defaults
    let service = ProfileService::new(Arc::new(SeaProfileStore::new(conn.clone())));
    let loaded = service
        .load_profile(Some(&SessionUser::new(seed.auth_id.clone(), seed.email.clone())))
        .await;
    let provisioned = loaded.profile().expect("loaded").clone();
    assert_eq!(provisioned.wallet.as_ref().map(|w| w.coins), Some(0));

    let first = seed_player(&conn, seed.clone()).await.unwrap();
    let second = seed_player(&conn, seed).await.unwrap();

    assert_eq!(first.account.id, provisioned.account.id);
    assert_eq!(second.account.id, provisioned.account.id);
    assert_eq!(
        second.wallet.as_ref().map(|w| w.id),
        provisioned.wallet.as_ref().map(|w| w.id)
    );
    assert_eq!(second.wallet.map(|w| w.coins), Some(1000));
    assert_eq!(row_counts(&conn).await, (1, 1, 1));
}

#[tokio::test]
async fn test_clear_player_cascades() {
    let conn = memory_db().await;
    let seed = player();
    let profile = seed_player(&conn, seed.clone()).await.unwrap();
    assert_eq!(row_counts(&conn).await, (1, 1, 1));

    assert!(clear_player(&conn, &seed.auth_id).await.unwrap());
    assert_eq!(row_counts(&conn).await, (0, 0, 0));
    assert_eq!(
        wallets::find_by_account_id(&conn, profile.account.id).await,
        Ok(None)
    );

    assert!(!clear_player(&conn, &seed.auth_id).await.unwrap());
}

#[tokio::test]
async fn test_clear_leaves_other_players_alone() {
    let conn = memory_db().await;
    let keep = player();
    let drop_me = player();
    seed_player(&conn, keep.clone()).await.unwrap();
    seed_player(&conn, drop_me.clone()).await.unwrap();

    clear_player(&conn, &drop_me.auth_id).await.unwrap();

    assert_eq!(row_counts(&conn).await, (1, 1, 1));
}
