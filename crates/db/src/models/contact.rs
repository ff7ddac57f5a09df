//! Contact entity model and DTOs.

use salesdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A contact row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub owner_id: DbId,
    pub lead_id: Option<DbId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new contact.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub lead_id: Option<DbId>,
}

/// DTO for updating an existing contact. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub position: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::models::nullable")]
    pub lead_id: Option<Option<DbId>>,
}
