//! Machine-readable error codes for the dashboard API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Each
//! variant maps 1:1 to the SCREAMING_SNAKE_CASE string in responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,

    // Request validation
    ValidationError,
    FkViolation,

    // Not found
    AccountNotFound,
    NotFound,

    // Conflicts
    DuplicateAccount,
    DuplicateGameStats,
    DuplicateWallet,
    Conflict,

    // System
    DbError,
    DbUnavailable,
    DbTimeout,
    ProfileLoadFailed,
    InternalError,
    ConfigError,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::FkViolation => "FK_VIOLATION",

            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DuplicateAccount => "DUPLICATE_ACCOUNT",
            Self::DuplicateGameStats => "DUPLICATE_GAME_STATS",
            Self::DuplicateWallet => "DUPLICATE_WALLET",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::ProfileLoadFailed => "PROFILE_LOAD_FAILED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
