//! Repository for the `contacts` table.

use salesdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact::{Contact, CreateContact, UpdateContact};
use crate::models::patch_value;

const COLUMNS: &str =
    "id, owner_id, lead_id, name, email, phone, company, position, created_at, updated_at";

/// Provides CRUD operations for contacts, always scoped to an owner.
pub struct ContactRepo;

impl ContactRepo {
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateContact,
    ) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (owner_id, lead_id, name, email, phone, company, position)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(owner_id)
            .bind(input.lead_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.company)
            .bind(&input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's contacts alphabetically.
    pub async fn list(
        pool: &PgPool,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts WHERE owner_id = $1
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List contacts linked to a lead.
    pub async fn list_by_lead(
        pool: &PgPool,
        owner_id: DbId,
        lead_id: DbId,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts WHERE owner_id = $1 AND lead_id = $2
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(owner_id)
            .bind(lead_id)
            .fetch_all(pool)
            .await
    }

    /// Update a contact. Only fields present in `input` are applied;
    /// `Some(None)` clears `lead_id`, `company` or `position`.
    pub async fn update(
        pool: &PgPool,
        owner_id: DbId,
        id: DbId,
        input: &UpdateContact,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let (set_lead, lead_id) = patch_value(&input.lead_id);
        let (set_company, company) = patch_value(&input.company);
        let (set_position, position) = patch_value(&input.position);

        let query = format!(
            "UPDATE contacts SET
                lead_id = CASE WHEN $3 THEN $4 ELSE lead_id END,
                name = COALESCE($5, name),
                email = COALESCE($6, email),
                phone = COALESCE($7, phone),
                company = CASE WHEN $8 THEN $9 ELSE company END,
                position = CASE WHEN $10 THEN $11 ELSE position END
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(set_lead)
            .bind(lead_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(set_company)
            .bind(company)
            .bind(set_position)
            .bind(position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, owner_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
