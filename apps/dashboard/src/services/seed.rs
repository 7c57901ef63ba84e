//! Development seed data: one player with a stocked wallet and mid-game stats.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::repos::{accounts, game_stats, wallets, GameStatsDefaults, NewAccount, WalletDefaults};
use crate::services::profiles::Profile;

pub const DEFAULT_SEED_AUTH_ID: &str = "seed-player";
pub const DEFAULT_SEED_EMAIL: &str = "test@example.com";

pub const SEED_WALLET: WalletDefaults = WalletDefaults {
    coins: 1000,
    gems: 50,
    stars: 10,
};

pub const SEED_GAME_STATS: GameStatsDefaults = GameStatsDefaults {
    eggs: 3,
    hp: 85,
    max_hp: 100,
    mp: 40,
    max_mp: 50,
    xp: 250,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedPlayer {
    pub auth_id: String,
    pub email: String,
}

impl Default for SeedPlayer {
    fn default() -> Self {
        Self {
            auth_id: DEFAULT_SEED_AUTH_ID.to_string(),
            email: DEFAULT_SEED_EMAIL.to_string(),
        }
    }
}

/// Find or create the player's account and overwrite its wallet and stats
/// with the seed values. Safe to run repeatedly.
pub async fn seed_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player: SeedPlayer,
) -> Result<Profile, DomainError> {
    let account = match accounts::find_by_auth_id(conn, &player.auth_id).await? {
        Some(account) => account,
        None => {
            info!(auth_id = %player.auth_id, email = %Redacted(&player.email), "seed: creating account");
            accounts::create_account(conn, NewAccount::new(player.auth_id, player.email)).await?
        }
    };

    let wallet = wallets::upsert_wallet(conn, account.id, SEED_WALLET).await?;
    info!(
        account_id = %account.id,
        coins = wallet.coins,
        gems = wallet.gems,
        stars = wallet.stars,
        "seed: wallet written"
    );

    let stats = game_stats::upsert_game_stats(conn, account.id, SEED_GAME_STATS).await?;
    info!(
        account_id = %account.id,
        hp = stats.hp,
        max_hp = stats.max_hp,
        mp = stats.mp,
        max_mp = stats.max_mp,
        xp = stats.xp,
        "seed: game stats written"
    );

    Ok(Profile {
        account,
        game_stats: Some(stats),
        wallet: Some(wallet),
    })
}

/// Remove the player's account; stats and wallet follow through the cascade.
/// Returns whether an account existed.
pub async fn clear_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    auth_id: &str,
) -> Result<bool, DomainError> {
    let removed = accounts::delete_by_auth_id(conn, auth_id).await?;
    info!(auth_id = %auth_id, removed, "seed: player cleared");
    Ok(removed)
}
