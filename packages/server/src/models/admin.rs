use common::Theme;
use serde::{Deserialize, Serialize};

use super::shared::non_blank;
use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "Root Admin")]
    pub name: Option<String>,
    #[schema(example = "9999999999")]
    pub contact: Option<String>,
}

/// Trimmed `(name, contact)` credentials, or a validation error if either is blank.
pub fn validate_login_request(payload: &LoginRequest) -> Result<(&str, &str), AppError> {
    match (
        non_blank(payload.name.as_deref()),
        non_blank(payload.contact.as_deref()),
    ) {
        (Some(name), Some(contact)) => Ok((name, contact)),
        _ => Err(AppError::Validation(
            "Name and contact number are required".into(),
        )),
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(example = "Root Admin")]
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Logged out successfully")]
    pub message: String,
}

/// The admin behind the current session cookie.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    pub user_id: String,
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ThemeCount {
    pub theme: Theme,
    pub count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[schema(example = 12)]
    pub total_teams: u64,
    #[schema(example = 41)]
    pub total_participants: u64,
    /// Team counts for every theme, including themes with no teams.
    pub teams_by_theme: Vec<ThemeCount>,
}
