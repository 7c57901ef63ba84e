pub mod accounts;
pub mod game_stats;
pub mod wallets;

pub use accounts::Entity as Accounts;
pub use accounts::Model as AccountModel;
pub use game_stats::Entity as GameStatsTable;
pub use game_stats::Model as GameStatsModel;
pub use wallets::Entity as Wallets;
pub use wallets::Model as WalletModel;
