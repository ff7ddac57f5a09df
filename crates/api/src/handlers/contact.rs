//! Handlers for the `/contacts` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use salesdesk_core::error::CoreError;
use salesdesk_core::types::DbId;
use salesdesk_core::validation::{
    normalize_email, require_non_blank, trim_nullable, validate_phone,
};
use salesdesk_db::models::contact::{Contact, CreateContact, UpdateContact};
use salesdesk_db::repositories::ContactRepo;
use salesdesk_events::{ChangeEvent, ChangeTable};

use crate::error::{AppError, AppResult};
use crate::handlers::lead::validate_lead_reference;
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY_CONTACT: &str = "contact";

/// GET /api/v1/contacts
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    let (limit, offset) = page.resolve();
    let contacts = ContactRepo::list(&state.pool, user.user_id, limit, offset).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// POST /api/v1/contacts
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateContact>,
) -> AppResult<(StatusCode, Json<Contact>)> {
    require_non_blank("name", &input.name)?;
    require_non_blank("phone", &input.phone)?;
    input.name = input.name.trim().to_string();
    input.email = normalize_email(&input.email)?;
    validate_phone(Some(&input.phone))?;
    input.phone = input.phone.trim().to_string();
    validate_lead_reference(&state, user.user_id, input.lead_id).await?;

    let contact = ContactRepo::create(&state.pool, user.user_id, &input).await?;
    state.notify(ChangeEvent::inserted(
        ChangeTable::Contacts,
        contact.id,
        user.user_id,
    ));
    Ok((StatusCode::CREATED, Json(contact)))
}

/// GET /api/v1/contacts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Contact>> {
    let contact = ContactRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_CONTACT, id))?;
    Ok(Json(contact))
}

/// PUT /api/v1/contacts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateContact>,
) -> AppResult<Json<Contact>> {
    normalize_update(&mut input)?;
    validate_lead_reference(&state, user.user_id, input.lead_id.flatten()).await?;

    let contact = ContactRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found(ENTITY_CONTACT, id))?;
    state.notify(ChangeEvent::updated(
        ChangeTable::Contacts,
        contact.id,
        user.user_id,
    ));
    Ok(Json(contact))
}

/// DELETE /api/v1/contacts/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ContactRepo::delete(&state.pool, user.user_id, id).await? {
        return Err(AppError::not_found(ENTITY_CONTACT, id));
    }
    state.notify(ChangeEvent::deleted(ChangeTable::Contacts, id, user.user_id));
    Ok(StatusCode::NO_CONTENT)
}

fn normalize_update(input: &mut UpdateContact) -> Result<(), CoreError> {
    if let Some(name) = input.name.as_deref() {
        require_non_blank("name", name)?;
        input.name = Some(name.trim().to_string());
    }
    if let Some(email) = input.email.as_deref() {
        input.email = Some(normalize_email(email)?);
    }
    if let Some(phone) = input.phone.as_deref() {
        require_non_blank("phone", phone)?;
        validate_phone(Some(phone))?;
        input.phone = Some(phone.trim().to_string());
    }
    input.company = trim_nullable(input.company.take());
    input.position = trim_nullable(input.position.take());
    Ok(())
}
