use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    AuthId,
    Email,
    Username,
    Role,
    CreatedAt,
    UpdatedAt,
    LastLoginAt,
}

#[derive(Iden)]
enum GameStats {
    Table,
    Id,
    AccountId,
    Eggs,
    Hp,
    MaxHp,
    Mp,
    MaxMp,
    Xp,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Wallets {
    Table,
    Id,
    AccountId,
    Coins,
    Gems,
    Stars,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // accounts
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Accounts::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Accounts::AuthId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::Email).string().not_null())
                    .col(ColumnDef::new(Accounts::Username).string().null())
                    .col(
                        ColumnDef::new(Accounts::Role)
                            .string_len(16)
                            .not_null()
                            .default("player"),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::LastLoginAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // game_stats: one row per account
        manager
            .create_table(
                Table::create()
                    .table(GameStats::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GameStats::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(GameStats::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(GameStats::Eggs).integer().not_null().default(0))
                    .col(ColumnDef::new(GameStats::Hp).integer().not_null().default(100))
                    .col(ColumnDef::new(GameStats::MaxHp).integer().not_null().default(100))
                    .col(ColumnDef::new(GameStats::Mp).integer().not_null().default(50))
                    .col(ColumnDef::new(GameStats::MaxMp).integer().not_null().default(50))
                    .col(ColumnDef::new(GameStats::Xp).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(GameStats::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GameStats::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_stats_account_id")
                            .from(GameStats::Table, GameStats::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // wallets: one row per account
        manager
            .create_table(
                Table::create()
                    .table(Wallets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Wallets::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Wallets::AccountId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Wallets::Coins).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Wallets::Gems).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Wallets::Stars).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Wallets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Wallets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wallets_account_id")
                            .from(Wallets::Table, Wallets::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // dependents first
        manager
            .drop_table(Table::drop().table(Wallets::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GameStats::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Accounts::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
