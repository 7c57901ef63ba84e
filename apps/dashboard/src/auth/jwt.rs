use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::session::SessionUser;
use crate::state::security_config::SecurityConfig;

/// Claims carried by the auth provider's access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    /// Auth user id; becomes `accounts.auth_id`.
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub aud: String,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn into_session_user(self) -> SessionUser {
        SessionUser::new(self.sub, self.email.unwrap_or_default())
    }
}

/// Sign an HS256 token the way the auth provider would. Used by tests and
/// local tooling; production tokens come from the provider.
pub fn mint_access_token(
    sub: &str,
    email: Option<&str>,
    now: SystemTime,
    ttl: Duration,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal(ErrorCode::InternalError, "Clock before UNIX epoch"))?
        .as_secs() as i64;

    let claims = SessionClaims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        aud: security.audience.clone(),
        iat,
        exp: iat + ttl.as_secs() as i64,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(ErrorCode::InternalError, format!("Failed to encode JWT: {e}")))
}

/// Verify signature, expiry and audience, returning the claims.
pub fn verify_access_token(
    token: &str,
    security: &SecurityConfig,
) -> Result<SessionClaims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.set_audience(&[security.audience.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);

    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}
