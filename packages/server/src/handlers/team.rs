use axum::Json;
use axum::extract::{Path, Query, State};
use common::{Role, Theme};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, LockType};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{team, team_member, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::session::AdminSession;
use crate::models::shared::escape_like;
use crate::models::team::*;
use crate::state::AppState;
use crate::utils::team::{find_team, populate_team, populate_teams};

#[utoipa::path(
    get,
    path = "/",
    tag = "Teams",
    operation_id = "listTeams",
    summary = "List and search teams",
    description = "Returns all teams with members populated, newest first. `search` is a case-insensitive substring match against the team name or team id; `theme` filters by exact theme. No match yields an empty array.",
    params(TeamListQuery),
    responses(
        (status = 200, description = "Matching teams", body = Vec<TeamResponse>),
        (status = 400, description = "Unknown theme (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_teams(
    _admin: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<TeamListQuery>,
) -> Result<Json<Vec<TeamResponse>>, AppError> {
    let mut select = team::Entity::find();

    if let Some(theme) = query.theme.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let theme: Theme = theme
            .parse()
            .map_err(|e: common::ParseEnumError| AppError::Validation(e.to_string()))?;
        select = select.filter(team::Column::Theme.eq(theme));
    }

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(team::Column::TeamName)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(team::Column::TeamId)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
    }

    let teams = select
        .order_by_desc(team::Column::CreatedAt)
        .order_by_asc(team::Column::TeamId)
        .all(&state.db)
        .await?;

    Ok(Json(populate_teams(&state.db, teams).await?))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Teams",
    operation_id = "getTeam",
    summary = "Get a team by team id",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamResponse),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_team(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TeamResponse>, AppError> {
    let model = find_team(&state.db, &id).await?;
    Ok(Json(populate_team(&state.db, model).await?))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Teams",
    operation_id = "updateTeam",
    summary = "Partially update a team",
    description = "Updates the team name, theme, gender counts or submission links using PATCH semantics. An empty payload returns the current team unchanged. Roster fields are rejected.",
    params(("id" = String, Path, description = "Team ID")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, _admin, payload))]
pub async fn update_team(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateTeamRequest>,
) -> Result<Json<TeamResponse>, AppError> {
    validate_update_team(&payload)?;

    if payload == UpdateTeamRequest::default() {
        let existing = find_team(&state.db, &id).await?;
        return Ok(Json(populate_team(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_team_for_update(&txn, &id).await?;
    let mut active: team::ActiveModel = existing.into();

    if let Some(ref name) = payload.team_name {
        active.team_name = Set(name.trim().to_string());
    }
    if let Some(theme) = payload.theme {
        active.theme = Set(theme);
    }
    if let Some(num_males) = payload.num_males {
        active.num_males = Set(num_males);
    }
    if let Some(num_females) = payload.num_females {
        active.num_females = Set(num_females);
    }
    if let Some(link) = payload.abstract_submission {
        active.abstract_submission = Set(link.map(|l| l.trim().to_string()));
    }
    if let Some(link) = payload.project_submission {
        active.project_submission = Set(link.map(|l| l.trim().to_string()));
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    let response = populate_team(&txn, model).await?;
    txn.commit().await?;

    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Teams",
    operation_id = "deleteTeam",
    summary = "Delete a team and its participants",
    description = "Removes the team, its roster links and every participant whose team_id matches. Returns the deleted team and the number of participants removed.",
    params(("id" = String, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team deleted", body = DeleteTeamResponse),
        (status = 401, description = "Not logged in (SESSION_MISSING, SESSION_INVALID)", body = ErrorBody),
        (status = 404, description = "Team not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("admin_session" = [])),
)]
#[instrument(skip(state, admin))]
pub async fn delete_team(
    admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTeamResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_team_for_update(&txn, &id).await?;
    let deleted_team = populate_team(&txn, existing).await?;

    team_member::Entity::delete_many()
        .filter(team_member::Column::TeamId.eq(id.as_str()))
        .exec(&txn)
        .await?;
    team::Entity::delete_by_id(id.clone()).exec(&txn).await?;
    let participants = user::Entity::delete_many()
        .filter(user::Column::TeamId.eq(id.as_str()))
        .filter(user::Column::Role.eq(Role::Participant))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    tracing::info!(
        team_id = %id,
        deleted_participants = participants.rows_affected,
        admin = %admin.user_id,
        "Team deleted"
    );

    Ok(Json(DeleteTeamResponse {
        message: "Team and associated participants successfully deleted".into(),
        deleted_team,
        deleted_participants: participants.rows_affected,
    }))
}

async fn find_team_for_update(txn: &DatabaseTransaction, id: &str) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(id.to_owned())
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}
