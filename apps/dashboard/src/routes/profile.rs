use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::errors::ErrorCode;
use crate::extractors::CurrentUser;
use crate::services::profiles::{ProfileError, ProfileLoad};
use crate::state::app_state::AppState;

/// Infra failures keep their 503/504 status; anything else is a 500 with the
/// load error's message.
fn load_failure(err: ProfileError) -> AppError {
    match &err.source {
        DomainError::Infra(InfraErrorKind::DbUnavailable, _) => {
            AppError::db_unavailable(err.message())
        }
        DomainError::Infra(InfraErrorKind::Timeout, _) => AppError::Timeout {
            detail: err.message(),
        },
        _ => AppError::internal(ErrorCode::ProfileLoadFailed, err.message()),
    }
}

/// GET /api/profile: the caller's account, stats and wallet, provisioning
/// whatever is missing. Stats or wallet may be `null`.
async fn get_profile(
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CurrentUser(session) = user;

    match app_state.profiles.load_profile(Some(&session)).await {
        ProfileLoad::Loaded(profile) => Ok(HttpResponse::Ok().json(profile)),
        ProfileLoad::Failed(err) => Err(load_failure(err)),
        // a verified token always names a user; an empty `sub` lands here
        ProfileLoad::SignedOut => Err(AppError::unauthorized()),
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/profile", web::get().to(get_profile));
}
