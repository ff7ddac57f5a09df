//! Repository for the `leads` table.

use salesdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, DeletedLead, Lead, LeadListFilter, UpdateLead};
use crate::models::patch_value;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, full_name, source, status, value_cents, description, \
                       specialization, batch_date, job_title, email, phone, created_at, updated_at";

/// Provides CRUD operations for leads, always scoped to an owner.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead for `owner_id`, returning the created row.
    ///
    /// Missing `status` defaults to `new`, missing `value_cents` to 0,
    /// missing `source` to the column default.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLead,
    ) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (owner_id, full_name, source, status, value_cents, description,
                                specialization, batch_date, job_title, email, phone)
             VALUES ($1, $2, COALESCE($3, 'manual'), COALESCE($4, 'new'), COALESCE($5, 0),
                     $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(owner_id)
            .bind(&input.full_name)
            .bind(&input.source)
            .bind(&input.status)
            .bind(input.value_cents)
            .bind(&input.description)
            .bind(&input.specialization)
            .bind(input.batch_date)
            .bind(&input.job_title)
            .bind(&input.email)
            .bind(&input.phone)
            .fetch_one(pool)
            .await
    }

    /// Find a lead by ID for the given owner.
    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a lead with `id` exists for the given owner.
    pub async fn exists(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM leads WHERE id = $1 AND owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_one(pool)
        .await
    }

    /// List leads matching `filter`. `None` filter fields match everything.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        filter: &LeadListFilter,
    ) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads
             WHERE owner_id = $1
               AND ($2::text IS NULL OR status = $2)
               AND ($3::text IS NULL OR source = $3)
               AND ($4::text IS NULL
                    OR full_name ILIKE $4
                    OR email ILIKE $4
                    OR job_title ILIKE $4)
             ORDER BY {}
             LIMIT $5 OFFSET $6",
            filter.order_by
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(owner_id)
            .bind(&filter.status)
            .bind(&filter.source)
            .bind(&filter.search_pattern)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Every lead of an owner, newest first. Feeds the dashboard and board.
    pub async fn list_all(pool: &PgPool, owner_id: DbId) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lead. Only fields present in `input` are applied; for
    /// nullable columns `Some(None)` clears the value.
    ///
    /// Returns `None` if no row with the given `id` exists for the owner.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateLead,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let (set_description, description) = patch_value(&input.description);
        let (set_specialization, specialization) = patch_value(&input.specialization);
        let (set_batch_date, batch_date) = patch_value(&input.batch_date);
        let (set_job_title, job_title) = patch_value(&input.job_title);
        let (set_email, email) = patch_value(&input.email);
        let (set_phone, phone) = patch_value(&input.phone);

        let query = format!(
            "UPDATE leads SET
                full_name = COALESCE($3, full_name),
                source = COALESCE($4, source),
                status = COALESCE($5, status),
                value_cents = COALESCE($6, value_cents),
                description = CASE WHEN $7 THEN $8 ELSE description END,
                specialization = CASE WHEN $9 THEN $10 ELSE specialization END,
                batch_date = CASE WHEN $11 THEN $12 ELSE batch_date END,
                job_title = CASE WHEN $13 THEN $14 ELSE job_title END,
                email = CASE WHEN $15 THEN $16 ELSE email END,
                phone = CASE WHEN $17 THEN $18 ELSE phone END
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.full_name)
            .bind(&input.source)
            .bind(&input.status)
            .bind(input.value_cents)
            .bind(set_description)
            .bind(description)
            .bind(set_specialization)
            .bind(specialization)
            .bind(set_batch_date)
            .bind(batch_date)
            .bind(set_job_title)
            .bind(job_title)
            .bind(set_email)
            .bind(email)
            .bind(set_phone)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    /// Set only the `status` column (pipeline drag-and-drop).
    pub async fn update_status(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        status: &str,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $3 WHERE id = $1 AND owner_id = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a lead, returning the dependent rows it touched.
    ///
    /// Activities cascade; contacts are unlinked by the foreign key.
    /// Returns `None` if no row with the given `id` exists for the owner.
    pub async fn delete(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<DeletedLead>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let contact_ids = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM contacts WHERE lead_id = $1 AND owner_id = $2 ORDER BY id FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;
        let activity_ids = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM activities WHERE lead_id = $1 AND owner_id = $2 ORDER BY id FOR UPDATE",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM leads WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(DeletedLead {
            contact_ids,
            activity_ids,
        }))
    }
}
