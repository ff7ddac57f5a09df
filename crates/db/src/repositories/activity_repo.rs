//! Repository for the `activities` table.

use salesdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::activity::{Activity, CreateActivity, UpdateActivity};
use crate::models::patch_value;

const COLUMNS: &str = "id, owner_id, lead_id, activity_type, notes, scheduled_at, completed, \
                       created_at, updated_at";

/// Provides CRUD operations for activities, always scoped to an owner.
pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (owner_id, lead_id, activity_type, notes, scheduled_at, completed)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, false))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(owner_id)
            .bind(input.lead_id)
            .bind(&input.activity_type)
            .bind(&input.notes)
            .bind(input.scheduled_at)
            .bind(input.completed)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM activities WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's activities, newest first.
    ///
    /// `lead_id` and `completed` narrow the result when set.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        lead_id: Option<DbId>,
        completed: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities
             WHERE owner_id = $1
               AND ($2::bigint IS NULL OR lead_id = $2)
               AND ($3::boolean IS NULL OR completed = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(owner_id)
            .bind(lead_id)
            .bind(completed)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an activity. Only fields present in `input` are applied;
    /// `Some(None)` clears `lead_id`, `notes` or `scheduled_at`.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateActivity,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let (set_lead, lead_id) = patch_value(&input.lead_id);
        let (set_notes, notes) = patch_value(&input.notes);
        let (set_scheduled, scheduled_at) = patch_value(&input.scheduled_at);

        let query = format!(
            "UPDATE activities SET
                lead_id = CASE WHEN $3 THEN $4 ELSE lead_id END,
                activity_type = COALESCE($5, activity_type),
                notes = CASE WHEN $6 THEN $7 ELSE notes END,
                scheduled_at = CASE WHEN $8 THEN $9 ELSE scheduled_at END,
                completed = COALESCE($10, completed)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(set_lead)
            .bind(lead_id)
            .bind(&input.activity_type)
            .bind(set_notes)
            .bind(notes)
            .bind(set_scheduled)
            .bind(scheduled_at)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }

    /// Set the completed flag.
    pub async fn set_completed(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        completed: bool,
    ) -> Result<Option<Activity>, sqlx::Error> {
        let query = format!(
            "UPDATE activities SET completed = $3 WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(completed)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM activities WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
