//! Activity type tags and validation.

use crate::error::CoreError;

pub const ACTIVITY_CALL: &str = "call";
pub const ACTIVITY_EMAIL: &str = "email";
pub const ACTIVITY_MEETING: &str = "meeting";
pub const ACTIVITY_NOTE: &str = "note";
pub const ACTIVITY_TASK: &str = "task";

/// All valid activity type tags.
pub const VALID_ACTIVITY_TYPES: &[&str] = &[
    ACTIVITY_CALL,
    ACTIVITY_EMAIL,
    ACTIVITY_MEETING,
    ACTIVITY_NOTE,
    ACTIVITY_TASK,
];

/// Maximum length of activity notes.
pub const MAX_ACTIVITY_NOTES_LENGTH: usize = 5_000;

pub const ENTITY_ACTIVITY: &str = "activity";

/// Check an activity type against [`VALID_ACTIVITY_TYPES`].
pub fn validate_activity_type(activity_type: &str) -> Result<(), CoreError> {
    if VALID_ACTIVITY_TYPES.contains(&activity_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid activity type '{activity_type}'. Must be one of: {}",
            VALID_ACTIVITY_TYPES.join(", ")
        )))
    }
}

pub fn validate_activity_notes(notes: Option<&str>) -> Result<(), CoreError> {
    match notes {
        Some(n) if n.chars().count() > MAX_ACTIVITY_NOTES_LENGTH => Err(CoreError::Validation(
            format!("Activity notes must be at most {MAX_ACTIVITY_NOTES_LENGTH} characters"),
        )),
        _ => Ok(()),
    }
}
