//! Repository for the `lead_forms` table.

use salesdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead_form::{CreateLeadForm, LeadForm, UpdateLeadForm};
use crate::models::patch_value;

const COLUMNS: &str =
    "id, owner_id, title, description, source, is_active, created_at, updated_at";

/// Provides CRUD operations for lead-capture forms.
pub struct LeadFormRepo;

impl LeadFormRepo {
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLeadForm,
    ) -> Result<LeadForm, sqlx::Error> {
        let query = format!(
            "INSERT INTO lead_forms (owner_id, title, description, source, is_active)
             VALUES ($1, $2, $3, COALESCE($4, 'web_form'), COALESCE($5, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadForm>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.source)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<LeadForm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lead_forms WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, LeadForm>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active form regardless of owner. Used by the public
    /// submission endpoint, which has no authenticated caller.
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<LeadForm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lead_forms WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, LeadForm>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's forms, newest first.
    pub async fn list(pool: &PgPool, owner_id: DbId) -> Result<Vec<LeadForm>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM lead_forms WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, LeadForm>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLeadForm,
    ) -> Result<Option<LeadForm>, sqlx::Error> {
        let (set_description, description) = patch_value(&input.description);

        let query = format!(
            "UPDATE lead_forms SET
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                source = COALESCE($6, source),
                is_active = COALESCE($7, is_active)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LeadForm>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.title)
            .bind(set_description)
            .bind(description)
            .bind(&input.source)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lead_forms WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
