use chrono::{DateTime, Utc};
use common::{Gender, Role, Theme};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_submission_link, validate_team_name};
use crate::entity::{team, user};
use crate::error::AppError;

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamListQuery {
    /// Case-insensitive substring of the team name or team id.
    pub search: Option<String>,
    /// Exact theme label, e.g. `Theme 2`.
    pub theme: Option<String>,
}

/// Partial update of a team. Roster fields (`team_id`, `num_teammates`,
/// members) cannot be changed after registration.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateTeamRequest {
    pub team_name: Option<String>,
    pub theme: Option<Theme>,
    pub num_males: Option<i32>,
    pub num_females: Option<i32>,
    /// Link to the abstract PDF. `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub abstract_submission: Option<Option<String>>,
    /// Link to the project archive. `null` clears it.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub project_submission: Option<Option<String>>,
}

pub fn validate_update_team(req: &UpdateTeamRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.team_name {
        validate_team_name(name)?;
    }
    if req.num_males.is_some_and(|n| n < 0) || req.num_females.is_some_and(|n| n < 0) {
        return Err(AppError::Validation(
            "num_males and num_females must be >= 0".into(),
        ));
    }
    if let Some(Some(ref link)) = req.abstract_submission {
        validate_submission_link("abstract_submission", link)?;
    }
    if let Some(Some(ref link)) = req.project_submission {
        validate_submission_link("project_submission", link)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// A team member as shown on the dashboard.
#[derive(Serialize, Clone, utoipa::ToSchema)]
pub struct MemberResponse {
    #[schema(example = "UID-0190f5c2a1b87c3d9e5f1a2b3c4d5e6f")]
    pub user_id: String,
    pub team_id: Option<String>,
    pub name: String,
    pub gender: Gender,
    pub email: String,
    pub contact: String,
    pub college: String,
    pub stream: String,
    pub year: i32,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for MemberResponse {
    fn from(u: user::Model) -> Self {
        Self {
            user_id: u.user_id,
            team_id: u.team_id,
            name: u.name,
            gender: u.gender,
            email: u.email,
            contact: u.contact,
            college: u.college,
            stream: u.stream,
            year: u.year,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

/// A team with its members populated in roster order.
#[derive(Serialize, utoipa::ToSchema)]
pub struct TeamResponse {
    #[schema(example = "TID48213")]
    pub team_id: String,
    pub team_name: String,
    pub num_teammates: i32,
    pub num_males: i32,
    pub num_females: i32,
    pub theme: Theme,
    pub members: Vec<MemberResponse>,
    pub abstract_submission: Option<String>,
    pub project_submission: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamResponse {
    pub fn new(t: team::Model, members: Vec<MemberResponse>) -> Self {
        Self {
            team_id: t.team_id,
            team_name: t.team_name,
            num_teammates: t.num_teammates,
            num_males: t.num_males,
            num_females: t.num_females,
            theme: t.theme,
            members,
            abstract_submission: t.abstract_submission,
            project_submission: t.project_submission,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTeamResponse {
    #[schema(example = "Team and associated participants successfully deleted")]
    pub message: String,
    pub deleted_team: TeamResponse,
    /// Number of participant records removed along with the team.
    #[schema(example = 3)]
    pub deleted_participants: u64,
}
