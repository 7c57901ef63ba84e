use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::session::SessionUser;
use crate::state::app_state::AppState;

/// The session user behind a verified `Authorization: Bearer` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub SessionUser);

/// `auth_id` of the verified caller, left in request extensions for the
/// request logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthId(pub String);

/// Token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(value: &str) -> Option<&str> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }
    Some(token)
}

fn extract(req: &HttpRequest) -> Result<CurrentUser, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;
    let token = bearer_token(value).ok_or_else(AppError::unauthorized_missing_bearer)?;

    let state = req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        AppError::internal(ErrorCode::InternalError, "AppState not available")
    })?;

    let user = verify_access_token(token, &state.security)?.into_session_user();
    req.extensions_mut().insert(AuthId(user.id.clone()));
    Ok(CurrentUser(user))
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
