//! Lead status vocabulary and lead field validation.
//!
//! Status is a plain tag, not a state machine: any status may be replaced by
//! any other status through a direct update.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a lead's full name / title.
pub const MAX_FULL_NAME_LENGTH: usize = 200;

/// Maximum length of a lead source tag.
pub const MAX_SOURCE_LENGTH: usize = 50;

/// Maximum length of free-text description / notes.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Source recorded when a lead is created without one.
pub const DEFAULT_SOURCE: &str = "manual";

/// Entity name used in `NotFound` errors and change notifications.
pub const ENTITY_LEAD: &str = "lead";

// ---------------------------------------------------------------------------
// LeadStatus
// ---------------------------------------------------------------------------

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Negotiation,
    Won,
    Lost,
}

impl LeadStatus {
    /// Every status in pipeline (kanban column) order.
    pub const ALL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Proposal,
        LeadStatus::Negotiation,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    /// The tag stored in the `leads.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Proposal => "proposal",
            LeadStatus::Negotiation => "negotiation",
            LeadStatus::Won => "won",
            LeadStatus::Lost => "lost",
        }
    }

    /// Human-readable column heading.
    pub fn label(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Proposal => "Proposal",
            LeadStatus::Negotiation => "Negotiation",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }

    /// Won and lost leads have left the pipeline.
    pub fn is_closed(self) -> bool {
        matches!(self, LeadStatus::Won | LeadStatus::Lost)
    }

    /// Position of this status in [`LeadStatus::ALL`].
    pub fn position(self) -> usize {
        LeadStatus::ALL
            .iter()
            .position(|s| *s == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown lead status '{s}'. Expected one of: {}",
                    status_list()
                ))
            })
    }
}

fn status_list() -> String {
    LeadStatus::ALL
        .iter()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a lead's display name.
pub fn validate_full_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Lead name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_FULL_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Lead name must be at most {MAX_FULL_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a lead's monetary value (minor currency units).
pub fn validate_value_cents(value_cents: i64) -> Result<(), CoreError> {
    if value_cents < 0 {
        return Err(CoreError::Validation(
            "Lead value must not be negative".into(),
        ));
    }
    Ok(())
}

/// Trim a source tag and fall back to [`DEFAULT_SOURCE`] when blank.
pub fn normalize_source(source: Option<&str>) -> Result<String, CoreError> {
    let source = source.map(str::trim).filter(|s| !s.is_empty());
    match source {
        None => Ok(DEFAULT_SOURCE.to_string()),
        Some(s) if s.chars().count() > MAX_SOURCE_LENGTH => Err(CoreError::Validation(format!(
            "Lead source must be at most {MAX_SOURCE_LENGTH} characters"
        ))),
        Some(s) => Ok(s.to_string()),
    }
}

/// Validate optional free-text notes.
pub fn validate_description(description: Option<&str>) -> Result<(), CoreError> {
    if let Some(text) = description {
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(CoreError::Validation(format!(
                "Description must be at most {MAX_DESCRIPTION_LENGTH} characters"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
