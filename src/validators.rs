use email_address::EmailAddress;
use url::Url;

use crate::{
    errors::{ValidationError, ValidationIssue, ValidationResult},
    model::{COMMENT_MAX_LENGTH, DISPLAY_NAME_MAX_LENGTH, MAX_FAVORITE_TEAMS, POST_MAX_LENGTH},
};

/// Returns `true` if the provided string is a syntactically valid email address.
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::is_valid(value)
}

/// Returns `true` if the provided string parses as a URL with a scheme.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn bounded_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let trimmed = value.trim();
    let mut issues = Vec::new();
    if trimmed.is_empty() {
        issues.push(ValidationIssue::new(field, "validation.required", "value must not be empty"));
    }
    if trimmed.chars().count() > max {
        issues.push(ValidationIssue::new(
            field,
            "validation.length",
            format!("length must be at most {max}"),
        ));
    }
    if issues.is_empty() {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::new(issues))
    }
}

/// Trims and bounds-checks a post body. Returns the canonical (trimmed) text.
pub fn post_content(value: &str) -> ValidationResult<String> {
    bounded_text("content", value, POST_MAX_LENGTH)
}

/// Trims and bounds-checks a comment body. Returns the canonical text.
pub fn comment_content(value: &str) -> ValidationResult<String> {
    bounded_text("content", value, COMMENT_MAX_LENGTH)
}

/// Trims and bounds-checks a display name.
pub fn display_name(value: &str) -> ValidationResult<String> {
    bounded_text("displayName", value, DISPLAY_NAME_MAX_LENGTH)
}

pub fn email(value: &str) -> ValidationResult<()> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ValidationError::single("email", "validation.email", "value must be a valid email address"))
    }
}

pub fn photo_url(value: &str) -> ValidationResult<()> {
    if is_valid_url(value) {
        Ok(())
    } else {
        Err(ValidationError::single("photoUrl", "validation.url", "value must be a valid URL"))
    }
}

/// A profile may follow at most [`MAX_FAVORITE_TEAMS`] teams.
pub fn favorite_teams(ids: &[String]) -> ValidationResult<()> {
    if ids.len() > MAX_FAVORITE_TEAMS {
        return Err(ValidationError::single(
            "favoriteTeamIds",
            "validation.length",
            format!("length must be at most {MAX_FAVORITE_TEAMS}"),
        ));
    }
    Ok(())
}
