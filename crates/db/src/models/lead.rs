//! Lead entity model and DTOs.

use chrono::NaiveDate;
use salesdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A lead row from the `leads` table.
///
/// `status` holds one of the tags of [`salesdesk_core::lead::LeadStatus`];
/// the table's check constraint guarantees it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub owner_id: DbId,
    pub full_name: String,
    pub source: String,
    pub status: String,
    pub value_cents: i64,
    pub description: Option<String>,
    pub specialization: Option<String>,
    pub batch_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new lead.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLead {
    pub full_name: String,
    pub source: Option<String>,
    /// Defaults to `new` if omitted.
    pub status: Option<String>,
    /// Defaults to 0 if omitted.
    pub value_cents: Option<i64>,
    pub description: Option<String>,
    pub specialization: Option<String>,
    pub batch_date: Option<NaiveDate>,
    pub job_title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// DTO for updating an existing lead. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLead {
    pub full_name: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub value_cents: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub specialization: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub batch_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub job_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub phone: Option<Option<String>>,
}

/// Rows touched by deleting a lead.
///
/// Activities in `activity_ids` were cascade-deleted; contacts in
/// `contact_ids` survive with `lead_id` cleared.
#[derive(Debug, Clone, Default)]
pub struct DeletedLead {
    pub contact_ids: Vec<DbId>,
    pub activity_ids: Vec<DbId>,
}

/// Resolved filter set for listing leads.
///
/// `order_by` must come from `salesdesk_core::listing::order_by_clause`,
/// never from raw user input.
#[derive(Debug, Clone)]
pub struct LeadListFilter {
    pub status: Option<String>,
    pub source: Option<String>,
    /// An `ILIKE` pattern, already escaped.
    pub search_pattern: Option<String>,
    pub order_by: String,
    pub limit: i64,
    pub offset: i64,
}
