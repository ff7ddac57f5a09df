//! Field-level helpers shared by leads, contacts and user accounts.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of a phone number as entered by a user.
pub const MAX_PHONE_LENGTH: usize = 40;

/// Trim and lowercase an email address, then check its shape.
pub fn normalize_email(email: &str) -> Result<String, CoreError> {
    let normalized = email.trim().to_lowercase();
    if !normalized.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            email.trim()
        )));
    }
    Ok(normalized)
}

/// Like [`normalize_email`] but blank input is `None`.
pub fn normalize_optional_email(email: Option<&str>) -> Result<Option<String>, CoreError> {
    match trimmed(email) {
        None => Ok(None),
        Some(e) => normalize_email(e).map(Some),
    }
}

/// Accept digits, spaces and the usual punctuation (`+ - ( ) .`).
pub fn validate_phone(phone: Option<&str>) -> Result<(), CoreError> {
    let Some(phone) = trimmed(phone) else {
        return Ok(());
    };
    if phone.chars().count() > MAX_PHONE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Phone number must be at most {MAX_PHONE_LENGTH} characters"
        )));
    }
    let ok = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    if !ok || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation(format!(
            "'{phone}' is not a valid phone number"
        )));
    }
    Ok(())
}

/// Trim an optional string, mapping blank to `None`.
pub fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Trim a nullable patch value. A blank string clears the field.
pub fn trim_nullable(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(|inner| trimmed(inner.as_deref()).map(str::to_string))
}

/// Borrow the value a nullable patch field would write, if any.
pub fn patch_str(value: &Option<Option<String>>) -> Option<&str> {
    value.as_ref().and_then(Option::as_deref)
}

/// Require a non-blank string field.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
