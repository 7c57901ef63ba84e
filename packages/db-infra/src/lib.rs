//! Shared database configuration and bootstrap.
//! Used by the dashboard server and the operator CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db::{DbKind, DbOwner, RuntimeEnv};
pub use error::DbInfraError;
pub use infra::db::{bootstrap_db, connect_db, orchestrate_migration, run_migration};
