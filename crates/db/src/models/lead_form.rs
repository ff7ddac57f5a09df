//! Lead-capture form model and DTOs.

use chrono::NaiveDate;
use salesdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `lead_forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeadForm {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub source: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLeadForm {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `web_form` if omitted.
    pub source: Option<String>,
    pub is_active: Option<bool>,
}

/// DTO for updating a form. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLeadForm {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    pub source: Option<String>,
    pub is_active: Option<bool>,
}

/// Public payload posted to a form's submission endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FormSubmission {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub specialization: Option<String>,
    pub batch_date: Option<NaiveDate>,
    pub notes: Option<String>,
}
