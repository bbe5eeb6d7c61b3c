use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entity::{team, team_member, user};
use crate::error::AppError;
use crate::models::team::{MemberResponse, TeamResponse};

/// Generate a participant id, e.g. `UID-0190f5c2a1b87c3d9e5f1a2b3c4d5e6f`.
pub fn generate_user_id() -> String {
    format!("UID-{}", Uuid::now_v7().simple())
}

/// Generate a team id for clients that don't supply one.
pub fn generate_team_id() -> String {
    format!("TID-{}", Uuid::new_v4().simple())
}

/// Look up a team by its `team_id`, returning 404 if not found.
pub async fn find_team<C: ConnectionTrait>(db: &C, team_id: &str) -> Result<team::Model, AppError> {
    team::Entity::find_by_id(team_id.to_owned())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".into()))
}

/// Fetch the members of the given teams, grouped by team and in roster order.
pub async fn load_members<C: ConnectionTrait>(
    db: &C,
    team_ids: Vec<String>,
) -> Result<HashMap<String, Vec<MemberResponse>>, AppError> {
    if team_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = team_member::Entity::find()
        .filter(team_member::Column::TeamId.is_in(team_ids))
        .find_also_related(user::Entity)
        .order_by_asc(team_member::Column::TeamId)
        .order_by_asc(team_member::Column::Position)
        .all(db)
        .await?;

    let mut grouped: HashMap<String, Vec<MemberResponse>> = HashMap::new();
    for (link, member) in rows {
        if let Some(member) = member {
            grouped
                .entry(link.team_id)
                .or_default()
                .push(MemberResponse::from(member));
        }
    }
    Ok(grouped)
}

/// Build responses for a list of teams, populating their members.
pub async fn populate_teams<C: ConnectionTrait>(
    db: &C,
    teams: Vec<team::Model>,
) -> Result<Vec<TeamResponse>, AppError> {
    let ids = teams.iter().map(|t| t.team_id.clone()).collect();
    let mut members = load_members(db, ids).await?;
    Ok(teams
        .into_iter()
        .map(|t| {
            let roster = members.remove(&t.team_id).unwrap_or_default();
            TeamResponse::new(t, roster)
        })
        .collect())
}

/// Build the response for a single team.
pub async fn populate_team<C: ConnectionTrait>(
    db: &C,
    team: team::Model,
) -> Result<TeamResponse, AppError> {
    let mut teams = populate_teams(db, vec![team]).await?;
    teams
        .pop()
        .ok_or_else(|| AppError::Internal("populated team list was empty".into()))
}
