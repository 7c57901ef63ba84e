//! DTOs for wallets_sea adapter.

use uuid::Uuid;

/// DTO for inserting (or upserting) a wallets row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCreate {
    pub account_id: Uuid,
    pub coins: i64,
    pub gems: i64,
    pub stars: i64,
}
