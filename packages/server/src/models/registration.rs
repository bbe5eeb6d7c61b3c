use common::{Gender, Theme};
use serde::{Deserialize, Serialize};

use super::shared::{is_valid_contact, non_blank, normalize_email, validate_team_name};
use super::team::TeamResponse;
use crate::error::AppError;

/// Smallest and largest allowed team sizes.
pub const MIN_TEAMMATES: i32 = 2;
pub const MAX_TEAMMATES: i32 = 4;

/// Upper bound on submitted member entries, checked before any member is
/// looked up or written. Rosters within it still get the per-member and
/// roster-size errors.
pub const MAX_MEMBER_ENTRIES: usize = MAX_TEAMMATES as usize * 4;

/// Request body for `POST /api/register`.
///
/// Every field is optional at the wire level so that missing data is reported
/// with a message naming what is absent rather than a generic parse error.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamRequest {
    /// Team identifier chosen by the client. Generated when omitted.
    #[schema(example = "TID48213")]
    pub team_id: Option<String>,
    pub team_data: Option<TeamData>,
    pub member_data: Option<Vec<MemberData>>,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    #[schema(example = "Foo")]
    pub team_name: Option<String>,
    /// Must equal the `name` of one submitted member.
    #[schema(example = "Alice")]
    pub team_leader: Option<String>,
    #[schema(example = 2)]
    pub num_teammates: Option<i32>,
    /// Derived from member genders when omitted.
    pub num_males: Option<i32>,
    /// Derived from member genders when omitted.
    pub num_females: Option<i32>,
    #[schema(example = "Theme 1")]
    pub theme: Option<String>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct MemberData {
    #[schema(example = "Alice")]
    pub name: Option<String>,
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    #[schema(example = "9876543210")]
    pub contact: Option<String>,
    pub college: Option<String>,
    pub stream: Option<String>,
    /// Year of study, as a number or a numeric string.
    pub year: Option<YearInput>,
    #[schema(example = "female")]
    pub gender: Option<String>,
}

/// Registration forms submit the year as text; API clients tend to send a number.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum YearInput {
    Number(i64),
    Text(String),
}

impl YearInput {
    fn parse(&self) -> Option<i32> {
        let year = match self {
            YearInput::Number(n) => i32::try_from(*n).ok()?,
            YearInput::Text(s) => s.trim().parse::<i32>().ok()?,
        };
        (year > 0).then_some(year)
    }
}

/// Team fields after request-level validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamDraft {
    pub team_name: String,
    pub team_leader: String,
    pub num_teammates: i32,
    pub num_males: i32,
    pub num_females: i32,
    pub theme: Theme,
}

/// A member descriptor with every field present and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub contact: String,
    pub college: String,
    pub stream: String,
    pub year: i32,
    pub gender: Gender,
}

/// Check the team descriptor and the leader/member relationship.
///
/// Member fields are validated one by one later, interleaved with the
/// uniqueness checks, so that the first failing member determines the error.
pub fn validate_team_data(
    team: Option<&TeamData>,
    members: Option<&[MemberData]>,
) -> Result<TeamDraft, AppError> {
    let (Some(team), Some(members)) = (team, members) else {
        return Err(AppError::Validation("Missing required fields".into()));
    };

    let team_name = non_blank(team.team_name.as_deref());
    let team_leader = non_blank(team.team_leader.as_deref());
    let theme = non_blank(team.theme.as_deref());
    let (Some(team_name), Some(team_leader), Some(num_teammates), Some(theme)) =
        (team_name, team_leader, team.num_teammates, theme)
    else {
        return Err(AppError::Validation(
            "Missing required fields in teamData or memberData".into(),
        ));
    };
    if members.is_empty() {
        return Err(AppError::Validation(
            "Missing required fields in teamData or memberData".into(),
        ));
    }
    if members.len() > MAX_MEMBER_ENTRIES {
        return Err(AppError::Validation(format!(
            "memberData must contain at most {MAX_MEMBER_ENTRIES} entries"
        )));
    }

    validate_team_name(team_name)?;
    let theme: Theme = theme
        .parse()
        .map_err(|e: common::ParseEnumError| AppError::Validation(e.to_string()))?;

    let leader_exists = members
        .iter()
        .any(|m| non_blank(m.name.as_deref()) == Some(team_leader));
    if !leader_exists {
        return Err(AppError::Validation(
            "Team leader must be one of the team members".into(),
        ));
    }

    let count_gender = |wanted: Gender| {
        members
            .iter()
            .filter(|m| {
                m.gender
                    .as_deref()
                    .and_then(|g| g.parse::<Gender>().ok())
                    == Some(wanted)
            })
            .count() as i32
    };
    let num_males = team.num_males.unwrap_or_else(|| count_gender(Gender::Male));
    let num_females = team
        .num_females
        .unwrap_or_else(|| count_gender(Gender::Female));
    if num_males < 0 || num_females < 0 {
        return Err(AppError::Validation(
            "numMales and numFemales must be >= 0".into(),
        ));
    }

    Ok(TeamDraft {
        team_name: team_name.to_string(),
        team_leader: team_leader.to_string(),
        num_teammates,
        num_males,
        num_females,
        theme,
    })
}

/// Check that every field of one member is present and well-formed.
pub fn validate_member(member: &MemberData) -> Result<MemberDraft, AppError> {
    let name = non_blank(member.name.as_deref());
    let missing = || {
        AppError::Validation(format!(
            "Missing fields for member: {}",
            name.unwrap_or("unknown")
        ))
    };

    let name = name.ok_or_else(missing)?;
    let email = non_blank(member.email.as_deref()).ok_or_else(missing)?;
    let contact = non_blank(member.contact.as_deref()).ok_or_else(missing)?;
    let college = non_blank(member.college.as_deref()).ok_or_else(missing)?;
    let stream = non_blank(member.stream.as_deref()).ok_or_else(missing)?;
    let year = member.year.as_ref().ok_or_else(missing)?;
    let gender = non_blank(member.gender.as_deref()).ok_or_else(missing)?;

    let email = normalize_email(email).ok_or_else(|| {
        AppError::Validation(format!("Please enter a valid email for member: {name}"))
    })?;
    if !is_valid_contact(contact) {
        return Err(AppError::Validation(format!(
            "Please enter a valid 10-digit contact number for member: {name}"
        )));
    }
    let year = year.parse().ok_or_else(|| {
        AppError::Validation(format!("Year must be a positive number for member: {name}"))
    })?;
    let gender: Gender = gender
        .parse()
        .map_err(|e: common::ParseEnumError| AppError::Validation(e.to_string()))?;

    Ok(MemberDraft {
        name: name.to_string(),
        email,
        contact: contact.to_string(),
        college: college.to_string(),
        stream: stream.to_string(),
        year,
        gender,
    })
}

/// Use the client-supplied team id when present, otherwise `fallback()`.
pub fn resolve_team_id(
    team_id: Option<&str>,
    fallback: impl FnOnce() -> String,
) -> Result<String, AppError> {
    match non_blank(team_id) {
        Some(id) if id.chars().count() > 64 => Err(AppError::Validation(
            "teamId must be at most 64 characters".into(),
        )),
        Some(id) => Ok(id.to_string()),
        None => Ok(fallback()),
    }
}

/// Roster checks applied right before the team row is written.
pub fn check_roster_size(num_teammates: i32, member_count: usize) -> Result<(), AppError> {
    if !(MIN_TEAMMATES..=MAX_TEAMMATES).contains(&num_teammates) {
        return Err(AppError::TeamInvariant(format!(
            "Number of teammates must be between {MIN_TEAMMATES} and {MAX_TEAMMATES}"
        )));
    }
    if usize::try_from(num_teammates).ok() != Some(member_count) {
        return Err(AppError::TeamInvariant(
            "Number of team members must match num_teammates".into(),
        ));
    }
    Ok(())
}

/// Successful registration response.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTeamResponse {
    #[schema(example = "Team registered successfully")]
    pub message: String,
    #[schema(example = "TID48213")]
    pub team_id: String,
    pub team: TeamResponse,
}
