//! SeaORM -> DomainError translation.
//!
//! Adapters return raw `sea_orm::DbErr`; repos call `map_db_err` so services only
//! ever see `DomainError`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// `table.column` out of SQLite's "UNIQUE constraint failed: table.column".
fn sqlite_unique_target(msg: &str) -> Option<&str> {
    const MARKER: &str = "UNIQUE constraint failed: ";
    let start = msg.find(MARKER)? + MARKER.len();
    msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn conflict_for_sqlite_target(target: &str) -> Option<(ConflictKind, &'static str)> {
    match target {
        "accounts.auth_id" => Some((ConflictKind::DuplicateAccount, "Account already exists")),
        "game_stats.account_id" => Some((
            ConflictKind::DuplicateGameStats,
            "Game stats already exist for account",
        )),
        "wallets.account_id" => Some((
            ConflictKind::DuplicateWallet,
            "Wallet already exists for account",
        )),
        _ => None,
    }
}

fn conflict_for_postgres_constraint(msg: &str) -> Option<(ConflictKind, &'static str)> {
    if msg.contains("accounts_auth_id_key") {
        return Some((ConflictKind::DuplicateAccount, "Account already exists"));
    }
    if msg.contains("game_stats_account_id_key") {
        return Some((
            ConflictKind::DuplicateGameStats,
            "Game stats already exist for account",
        ));
    }
    if msg.contains("wallets_account_id_key") {
        return Some((
            ConflictKind::DuplicateWallet,
            "Wallet already exists for account",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");

        let known = sqlite_unique_target(&msg)
            .and_then(conflict_for_sqlite_target)
            .or_else(|| conflict_for_postgres_constraint(&msg));
        if let Some((kind, detail)) = known {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&msg, "23503") || msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if msg.contains("timeout") || msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
