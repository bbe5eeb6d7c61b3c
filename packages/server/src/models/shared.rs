use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// `local@domain.tld` with ASCII word characters only.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Returns the trimmed value when it is present and non-blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Lowercased, trimmed email if it has a plausible `local@domain.tld` shape.
pub fn normalize_email(email: &str) -> Option<String> {
    let email = email.trim().to_lowercase();
    EMAIL_RE.is_match(&email).then_some(email)
}

/// A contact number is exactly ten ASCII digits.
pub fn is_valid_contact(contact: &str) -> bool {
    contact.len() == 10 && contact.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a trimmed team name (1-256 Unicode characters).
pub fn validate_team_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 256 {
        return Err(AppError::Validation(
            "Team name must be 1-256 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a submission link attached to a team.
pub fn validate_submission_link(field: &str, link: &str) -> Result<(), AppError> {
    let link = link.trim();
    if link.is_empty() || link.len() > 2048 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-2048 characters"
        )));
    }
    Ok(())
}
