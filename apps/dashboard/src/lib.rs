#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod trace_ctx;

pub use auth::jwt::{mint_access_token, verify_access_token, SessionClaims};
pub use error::AppError;
pub use errors::domain::DomainError;
pub use extractors::CurrentUser;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use services::profiles::{Profile, ProfileError, ProfileLoad, ProfileService};
pub use services::store::{ProfileStore, SeaProfileStore};
pub use session::{ProfileMirror, ProfileSnapshot, SessionProvider, SessionUser};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_support::logging::init();
}
