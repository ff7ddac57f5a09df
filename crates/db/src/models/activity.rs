//! Activity entity model and DTOs.

use salesdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An activity row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub owner_id: DbId,
    pub lead_id: Option<DbId>,
    pub activity_type: String,
    pub notes: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for logging a new activity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub lead_id: Option<DbId>,
    pub activity_type: String,
    pub notes: Option<String>,
    pub scheduled_at: Option<Timestamp>,
    /// Defaults to `false` if omitted.
    pub completed: Option<bool>,
}

/// DTO for updating an existing activity. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateActivity {
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub lead_id: Option<Option<DbId>>,
    pub activity_type: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub scheduled_at: Option<Option<Timestamp>>,
    pub completed: Option<bool>,
}
