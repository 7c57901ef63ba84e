//! SeaORM adapters: raw table access returning `DbErr`.
//!
//! The repos layer maps `DbErr` into `DomainError` and models into domain types.

pub mod accounts_sea;
pub mod game_stats_sea;
pub mod wallets_sea;
