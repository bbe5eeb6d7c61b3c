use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use common::Role;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::session::{self, SESSION_COOKIE};

/// Admin identity taken from a verified `admin_session` cookie.
///
/// Add this as a handler parameter to restrict a route to logged-in admins.
pub struct AdminSession {
    pub user_id: String,
    pub name: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::SessionMissing)?;

        let claims = session::verify(&token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::SessionInvalid)?;

        if claims.role != Role::Admin {
            return Err(AppError::PermissionDenied);
        }

        Ok(AdminSession {
            user_id: claims.sub,
            name: claims.name,
        })
    }
}
