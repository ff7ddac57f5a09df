//! Lead-capture form validation.

use crate::error::CoreError;

pub const MAX_FORM_TITLE_LENGTH: usize = 200;

pub const ENTITY_LEAD_FORM: &str = "lead_form";

/// Source tag recorded on a form created without one.
pub const DEFAULT_FORM_SOURCE: &str = "web_form";

/// Validate a form title: non-blank and bounded.
pub fn validate_form_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Form title must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_FORM_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Form title must be at most {MAX_FORM_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Reject submissions that carry neither an email nor a phone number.
pub fn validate_submission_reachable(
    email: Option<&str>,
    phone: Option<&str>,
) -> Result<(), CoreError> {
    let has = |v: Option<&str>| v.is_some_and(|s| !s.trim().is_empty());
    if has(email) || has(phone) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Submission must include an email or a phone number".into(),
        ))
    }
}
