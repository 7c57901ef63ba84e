//! Repository layer: domain models and free functions generic over `ConnectionTrait`.

pub mod accounts;
pub mod game_stats;
pub mod wallets;

pub use accounts::{Account, AccountRole, NewAccount};
pub use game_stats::{GameStats, GameStatsDefaults};
pub use wallets::{Wallet, WalletDefaults};
