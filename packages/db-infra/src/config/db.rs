use std::env;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Which environment the process runs in; selects the database name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    /// Test environment - database names must end with `_test`
    Test,
}

/// Database engine backing the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unsupported database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Access level for the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (schema changes)
    Owner,
}

/// Build the connection string for the given environment, engine and owner.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = match env {
                RuntimeEnv::Prod => must_var("PROD_DB")?,
                RuntimeEnv::Test => validate_test_db_name(must_var("TEST_DB")?)?,
            };
            let (user, password) = match owner {
                DbOwner::App => (must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?),
                DbOwner::Owner => (
                    must_var("DASHBOARD_OWNER_USER")?,
                    must_var("DASHBOARD_OWNER_PASSWORD")?,
                ),
            };
            Ok(postgres_url(&host, &port, &db_name, &user, &password))
        }
        DbKind::SqliteFile => {
            let path =
                env::var("SQLITE_DB_PATH").unwrap_or_else(|_| "dashboard.sqlite3".to_string());
            Ok(sqlite_file_url(&path))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Credentials are percent-encoded so passwords with `@` or `:` survive.
pub fn postgres_url(host: &str, port: &str, db_name: &str, user: &str, password: &str) -> String {
    let user = utf8_percent_encode(user, NON_ALPHANUMERIC);
    let password = utf8_percent_encode(password, NON_ALPHANUMERIC);
    format!("postgresql://{user}:{password}@{host}:{port}/{db_name}")
}

pub fn sqlite_file_url(path: &str) -> String {
    format!("sqlite://{path}?mode=rwc")
}

/// Test databases must be named `*_test`.
pub fn validate_test_db_name(db_name: String) -> Result<String, DbInfraError> {
    if db_name.ends_with("_test") {
        Ok(db_name)
    } else {
        Err(DbInfraError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{db_name}'"
        )))
    }
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}
