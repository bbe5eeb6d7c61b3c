use std::collections::HashMap;

use axum::{Json, extract::State};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use common::{Role, Theme};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{team, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::session::AdminSession;
use crate::models::admin::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, StatsResponse, ThemeCount,
    validate_login_request,
};
use crate::state::AppState;
use crate::utils::session::{self, SESSION_COOKIE};

/// Log an admin in by name and contact number and set the session cookie.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Admin",
    operation_id = "adminLogin",
    summary = "Log in as an admin",
    description = "Looks up an admin by exact name and contact number. On success sets an HTTP-only signed `admin_session` cookie.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; session cookie set", body = LoginResponse),
        (status = 400, description = "Name or contact missing (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No matching admin (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let (name, contact) = validate_login_request(&payload)?;

    let admin = user::Entity::find()
        .filter(user::Column::Name.eq(name))
        .filter(user::Column::Contact.eq(contact))
        .filter(user::Column::Role.eq(Role::Admin))
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Admin not found. Please check your credentials.".into())
        })?;

    let auth = &state.config.auth;
    let token = session::sign(
        &admin.user_id,
        &admin.name,
        admin.role,
        &auth.jwt_secret,
        auth.session_ttl_secs,
    )
    .map_err(|e| AppError::Internal(format!("Session signing error: {e}")))?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(auth.secure_cookie)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(auth.session_ttl_secs))
        .build();

    tracing::info!(user_id = %admin.user_id, role = %admin.role, "Admin logged in");

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".into(),
            name: admin.name,
        }),
    ))
}

/// Clear the session cookie. Succeeds whether or not a session exists.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Admin",
    operation_id = "adminLogout",
    summary = "Log out",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let cleared = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(state.config.auth.secure_cookie)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();

    (
        jar.add(cleared),
        Json(MessageResponse {
            message: "Logged out successfully".into(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Admin",
    operation_id = "adminMe",
    summary = "Get the current admin",
    responses(
        (status = 200, description = "Current admin", body = MeResponse),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
pub async fn me(admin: AdminSession) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: admin.user_id,
        name: admin.name,
    })
}

#[utoipa::path(
    get,
    path = "/stats",
    tag = "Admin",
    operation_id = "adminStats",
    summary = "Dashboard statistics",
    description = "Total teams, total participants and the team count for every theme.",
    responses(
        (status = 200, description = "Aggregate counts", body = StatsResponse),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn stats(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let total_teams = team::Entity::find().count(&state.db).await?;
    let total_participants = user::Entity::find()
        .filter(user::Column::Role.eq(Role::Participant))
        .count(&state.db)
        .await?;

    let themes: Vec<Theme> = team::Entity::find()
        .select_only()
        .column(team::Column::Theme)
        .into_tuple()
        .all(&state.db)
        .await?;

    let mut per_theme: HashMap<Theme, u64> = HashMap::new();
    for theme in themes {
        *per_theme.entry(theme).or_insert(0) += 1;
    }

    let teams_by_theme = Theme::ALL
        .iter()
        .map(|&theme| ThemeCount {
            theme,
            count: per_theme.get(&theme).copied().unwrap_or(0),
        })
        .collect();

    Ok(Json(StatsResponse {
        total_teams,
        total_participants,
        teams_by_theme,
    }))
}
