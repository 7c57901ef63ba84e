//! Shared helpers for dashboard tests: unique fixture data and log setup.

pub mod logging;

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// ```
/// use test_support::unique_str;
///
/// let a = unique_str("auth");
/// let b = unique_str("auth");
/// assert_ne!(a, b);
/// assert!(a.starts_with("auth-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique address in the format `{prefix}-{ulid}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// A fresh auth-provider user id, shaped like the hosted provider's ids.
pub fn unique_auth_id() -> String {
    unique_str("auth").to_lowercase()
}
