use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use common::Role;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{team, team_member, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::registration::{
    MemberDraft, RegisterTeamRequest, RegisterTeamResponse, check_roster_size, resolve_team_id,
    validate_member, validate_team_data,
};
use crate::state::AppState;
use crate::utils::team::{generate_team_id, generate_user_id, populate_team};

const DUPLICATE_MEMBER_MSG: &str = "A user with the provided email or contact already exists.";

/// Register a team together with all of its members.
///
/// Users and the team are written in one transaction: any failure leaves no
/// partial roster behind.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Registration",
    operation_id = "registerTeam",
    summary = "Register a team and its members",
    description = "Validates the team descriptor and each member in submission order, creates one participant per member and the team referencing them. The first failing member aborts the whole request.",
    request_body = RegisterTeamRequest,
    responses(
        (status = 201, description = "Team registered", body = RegisterTeamResponse),
        (status = 400, description = "Invalid input (VALIDATION_ERROR), email/contact taken (DUPLICATE_MEMBER) or roster mismatch (TEAM_INVARIANT_VIOLATED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(team_id))]
pub async fn register_team(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterTeamRequest>,
) -> Result<impl IntoResponse, AppError> {
    let members = payload.member_data.as_deref();
    let draft = validate_team_data(payload.team_data.as_ref(), members)?;
    let members = members.unwrap_or_default();
    let team_id = resolve_team_id(payload.team_id.as_deref(), generate_team_id)?;
    tracing::Span::current().record("team_id", team_id.as_str());

    let now = Utc::now();
    let txn = state.db.begin().await?;

    if team::Entity::find_by_id(team_id.clone())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::TeamInvariant(format!(
            "Team '{team_id}' is already registered"
        )));
    }

    let mut user_ids = Vec::with_capacity(members.len());
    for raw in members {
        let member = validate_member(raw)?;
        ensure_member_is_new(&txn, &member).await?;

        let user_id = generate_user_id();
        let new_user = user::ActiveModel {
            user_id: Set(user_id.clone()),
            team_id: Set(Some(team_id.clone())),
            name: Set(member.name),
            gender: Set(member.gender),
            email: Set(member.email),
            contact: Set(member.contact),
            college: Set(member.college),
            stream: Set(member.stream),
            year: Set(member.year),
            role: Set(Role::Participant),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        new_user.insert(&txn).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Registration race: unique constraint caught on user insert");
                AppError::DuplicateMember(DUPLICATE_MEMBER_MSG.into())
            }
            _ => AppError::from(e),
        })?;
        user_ids.push(user_id);
    }

    check_roster_size(draft.num_teammates, user_ids.len())?;
    ensure_not_on_other_team(&txn, &team_id, &user_ids).await?;

    let new_team = team::ActiveModel {
        team_id: Set(team_id.clone()),
        team_name: Set(draft.team_name),
        num_teammates: Set(draft.num_teammates),
        num_males: Set(draft.num_males),
        num_females: Set(draft.num_females),
        theme: Set(draft.theme),
        abstract_submission: Set(None),
        project_submission: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let team_model = new_team.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::TeamInvariant(format!("Team '{team_id}' is already registered"))
        }
        _ => AppError::from(e),
    })?;

    let links = user_ids
        .iter()
        .enumerate()
        .map(|(position, user_id)| team_member::ActiveModel {
            user_id: Set(user_id.clone()),
            team_id: Set(team_id.clone()),
            position: Set(position as i32),
            ..Default::default()
        });
    team_member::Entity::insert_many(links)
        .exec_without_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::TeamInvariant(
                "One or more team members are already registered with another team".into(),
            ),
            _ => AppError::from(e),
        })?;

    let team = populate_team(&txn, team_model).await?;
    txn.commit().await?;

    tracing::info!(
        team_id = %team.team_id,
        members = team.members.len(),
        leader = %draft.team_leader,
        theme = %team.theme,
        "Team registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterTeamResponse {
            message: "Team registered successfully".into(),
            team_id: team.team_id.clone(),
            team,
        }),
    ))
}

/// Reject a member whose email or contact is already used by any user,
/// including members inserted earlier in the same request.
async fn ensure_member_is_new<C: ConnectionTrait>(
    db: &C,
    member: &MemberDraft,
) -> Result<(), AppError> {
    let existing = user::Entity::find()
        .filter(
            Condition::any()
                .add(user::Column::Email.eq(member.email.as_str()))
                .add(user::Column::Contact.eq(member.contact.as_str())),
        )
        .one(db)
        .await?;

    if existing.is_some() {
        tracing::debug!(member = %member.name, "Duplicate email or contact");
        return Err(AppError::DuplicateMember(DUPLICATE_MEMBER_MSG.into()));
    }
    Ok(())
}

async fn ensure_not_on_other_team<C: ConnectionTrait>(
    db: &C,
    team_id: &str,
    user_ids: &[String],
) -> Result<(), AppError> {
    let linked = team_member::Entity::find()
        .filter(team_member::Column::UserId.is_in(user_ids.iter().cloned()))
        .filter(team_member::Column::TeamId.ne(team_id))
        .one(db)
        .await?;

    if linked.is_some() {
        return Err(AppError::TeamInvariant(
            "One or more team members are already registered with another team".into(),
        ));
    }
    Ok(())
}
