use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;

async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, interval_ms, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(url: &str, db_kind: DbKind) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url.to_string());
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match db_kind {
        // every pooled connection to :memory: would be its own empty database
        DbKind::SqliteMemory => {
            opt.min_connections(1).max_connections(1);
        }
        DbKind::SqliteFile => {
            opt.max_connections(4);
        }
        DbKind::Postgres => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt
}

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, owner)?;
    let opt = connect_options(&url, db_kind);

    let conn = if matches!(db_kind, DbKind::Postgres) {
        retry_connection(
            || {
                let opt = opt.clone();
                async move {
                    Database::connect(opt)
                        .await
                        .map_err(|e| DbInfraError::Connect {
                            message: e.to_string(),
                        })
                }
            },
            CONNECT_ATTEMPTS,
            CONNECT_INTERVAL_MS,
        )
        .await?
    } else {
        Database::connect(opt)
            .await
            .map_err(|e| DbInfraError::Connect {
                message: e.to_string(),
            })?
    };

    if matches!(db_kind, DbKind::SqliteFile) {
        enable_sqlite_wal(&conn).await?;
    }

    Ok(conn)
}

/// Connect and bring the schema up to date; returns the application pool.
///
/// In-memory SQLite migrates over the same single connection it returns.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, DbInfraError> {
    info!(env = ?env, db_kind = ?db_kind, "db bootstrap starting");

    let app = match db_kind {
        DbKind::SqliteMemory => {
            let conn = connect_db(env, db_kind, DbOwner::App).await?;
            run_migration(&conn, MigrationCommand::Up).await?;
            conn
        }
        DbKind::Postgres | DbKind::SqliteFile => {
            let owner = connect_db(env, db_kind, DbOwner::Owner).await?;
            run_migration(&owner, MigrationCommand::Up).await?;
            owner.close().await.map_err(|e| DbInfraError::Connect {
                message: format!("failed to close owner pool: {e}"),
            })?;
            connect_db(env, db_kind, DbOwner::App).await?
        }
    };

    info!("db bootstrap done");
    Ok(app)
}

/// Run one migration command over an owner connection, then close it.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if matches!(db_kind, DbKind::SqliteMemory) {
        return Err(DbInfraError::config(
            "in-memory sqlite is discarded when the command exits; use postgres or sqlite-file",
        ));
    }

    let owner = connect_db(env, db_kind, DbOwner::Owner).await?;
    run_migration(&owner, command).await?;
    owner.close().await.map_err(|e| DbInfraError::Connect {
        message: format!("failed to close owner pool: {e}"),
    })
}

pub async fn run_migration(
    conn: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    migrate(conn, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: e.to_string(),
        })
}

async fn enable_sqlite_wal(conn: &DatabaseConnection) -> Result<(), DbInfraError> {
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        conn.execute(Statement::from_string(
            sea_orm::DatabaseBackend::Sqlite,
            pragma.to_string(),
        ))
        .await
        .map_err(|e| DbInfraError::Connect {
            message: format!("failed to apply '{pragma}': {e}"),
        })?;
    }
    Ok(())
}
