use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use dashboard::services::seed::{
    clear_player, seed_player, SeedPlayer, DEFAULT_SEED_AUTH_ID, DEFAULT_SEED_EMAIL,
};
use db_infra::{bootstrap_db, orchestrate_migration, DbKind, RuntimeEnv};
use migration::MigrationCommand;
use tracing::error;

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

/// In-memory SQLite is left out: it vanishes when the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Args)]
struct Target {
    /// Runtime environment (selects PROD_DB or TEST_DB)
    #[arg(short, long, value_enum, default_value = "test", global = true)]
    env: Env,

    /// Database engine
    #[arg(short, long, value_enum, default_value = "postgres", global = true)]
    db: Db,
}

#[derive(Parser)]
#[command(name = "dashctl", about = "Player dashboard operator tool")]
struct Cli {
    #[command(flatten)]
    target: Target,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a schema migration command: up | down | fresh | reset | refresh | status
    Migrate { command: MigrationCommand },

    /// Write development data for one player, or remove it with --clear
    Seed {
        #[arg(long, env = "SEED_AUTH_ID", default_value = DEFAULT_SEED_AUTH_ID)]
        auth_id: String,

        #[arg(long, env = "SEED_EMAIL", default_value = DEFAULT_SEED_EMAIL)]
        email: String,

        /// Delete the player (stats and wallet cascade) instead of seeding
        #[arg(long)]
        clear: bool,
    },
}

async fn run(cli: Cli) -> Result<(), String> {
    let env = RuntimeEnv::from(cli.target.env);
    let db_kind = DbKind::from(cli.target.db);

    match cli.command {
        Command::Migrate { command } => orchestrate_migration(env, db_kind, command)
            .await
            .map_err(|e| e.to_string()),
        Command::Seed {
            auth_id,
            email,
            clear,
        } => {
            let conn = bootstrap_db(env, db_kind).await.map_err(|e| e.to_string())?;

            if clear {
                let existed = clear_player(&conn, &auth_id)
                    .await
                    .map_err(|e| e.to_string())?;
                if existed {
                    println!("✅ Removed player {auth_id}");
                } else {
                    println!("⚠️  No player with auth id {auth_id}");
                }
                return Ok(());
            }

            let profile = seed_player(&conn, SeedPlayer { auth_id, email })
                .await
                .map_err(|e| e.to_string())?;
            println!("✅ Account: {} ({})", profile.account.id, profile.account.auth_id);
            if let Some(wallet) = &profile.wallet {
                println!(
                    "✅ Wallet: {} coins, {} gems, {} stars",
                    wallet.coins, wallet.gems, wallet.stars
                );
            }
            if let Some(stats) = &profile.game_stats {
                println!(
                    "✅ Stats: {}/{} HP, {}/{} MP, {} XP, {} eggs",
                    stats.hp, stats.max_hp, stats.mp, stats.max_mp, stats.xp, stats.eggs
                );
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("info,sqlx=warn,sea_orm=warn")
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "dashctl failed");
            eprintln!("❌ {message}");
            ExitCode::FAILURE
        }
    }
}
