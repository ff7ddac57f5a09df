//! Repository-level integration tests against a real PostgreSQL database.

use assert_matches::assert_matches;
use salesdesk_core::types::DbId;
use salesdesk_db::models::activity::{CreateActivity, UpdateActivity};
use salesdesk_db::models::contact::{CreateContact, UpdateContact};
use salesdesk_db::models::lead::{CreateLead, LeadListFilter, UpdateLead};
use salesdesk_db::models::lead_form::{CreateLeadForm, UpdateLeadForm};
use salesdesk_db::models::session::CreateSession;
use salesdesk_db::models::user::CreateUser;
use salesdesk_db::repositories::{
    ActivityRepo, ContactRepo, LeadFormRepo, LeadRepo, SessionRepo, UserRepo,
};
use sqlx::PgPool;

async fn user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            full_name: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn new_lead(full_name: &str) -> CreateLead {
    CreateLead {
        full_name: full_name.to_string(),
        source: None,
        status: None,
        value_cents: None,
        description: None,
        specialization: None,
        batch_date: None,
        job_title: None,
        email: None,
        phone: None,
    }
}

fn filter() -> LeadListFilter {
    LeadListFilter {
        status: None,
        source: None,
        search_pattern: None,
        order_by: "created_at DESC, id DESC".to_string(),
        limit: 100,
        offset: 0,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lead_defaults_come_from_schema(pool: PgPool) {
    let owner = user(&pool, "a@example.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("Ada")).await.unwrap();

    assert_eq!(lead.status, "new");
    assert_eq!(lead.source, "manual");
    assert_eq!(lead.value_cents, 0);
    assert_eq!(lead.owner_id, owner);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn queries_are_owner_scoped(pool: PgPool) {
    let alice = user(&pool, "alice@example.com").await;
    let bob = user(&pool, "bob@example.com").await;
    let lead = LeadRepo::create(&pool, alice, &new_lead("Secret")).await.unwrap();

    assert!(LeadRepo::find_by_id(&pool, bob, lead.id).await.unwrap().is_none());
    assert!(!LeadRepo::exists(&pool, bob, lead.id).await.unwrap());
    assert!(LeadRepo::list(&pool, bob, &filter()).await.unwrap().is_empty());
    assert!(LeadRepo::update_status(&pool, bob, lead.id, "won").await.unwrap().is_none());
    assert!(LeadRepo::update(&pool, bob, lead.id, &UpdateLead::default())
        .await
        .unwrap()
        .is_none());
    assert!(LeadRepo::delete(&pool, bob, lead.id).await.unwrap().is_none());

    let still_there = LeadRepo::find_by_id(&pool, alice, lead.id).await.unwrap().unwrap();
    assert_eq!(still_there.status, "new");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_only_touches_supplied_fields(pool: PgPool) {
    let owner = user(&pool, "u@example.com").await;
    let mut input = new_lead("Grace");
    input.value_cents = Some(1200);
    input.job_title = Some("Admiral".into());
    let lead = LeadRepo::create(&pool, owner, &input).await.unwrap();

    let update = UpdateLead {
        description: Some(Some("Met at conference".into())),
        ..Default::default()
    };
    let updated = LeadRepo::update(&pool, owner, lead.id, &update).await.unwrap().unwrap();

    assert_eq!(updated.description.as_deref(), Some("Met at conference"));
    assert_eq!(updated.value_cents, 1200);
    assert_eq!(updated.job_title.as_deref(), Some("Admiral"));
    assert!(updated.updated_at >= lead.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn explicit_none_clears_nullable_lead_columns(pool: PgPool) {
    let owner = user(&pool, "clear@example.com").await;
    let mut input = new_lead("Hedy");
    input.description = Some("old note".into());
    input.email = Some("hedy@example.com".into());
    input.job_title = Some("Inventor".into());
    let lead = LeadRepo::create(&pool, owner, &input).await.unwrap();

    let update = UpdateLead {
        description: Some(None),
        email: Some(None),
        ..Default::default()
    };
    let updated = LeadRepo::update(&pool, owner, lead.id, &update).await.unwrap().unwrap();

    assert_eq!(updated.description, None);
    assert_eq!(updated.email, None);
    assert_eq!(updated.job_title.as_deref(), Some("Inventor"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn contacts_and_activities_can_be_unlinked_from_lead(pool: PgPool) {
    let owner = user(&pool, "unlink@example.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("Linked")).await.unwrap();

    let contact = ContactRepo::create(
        &pool,
        owner,
        &CreateContact {
            name: "Assistant".into(),
            email: "assistant@example.com".into(),
            phone: "555-0100".into(),
            company: Some("Acme".into()),
            position: None,
            lead_id: Some(lead.id),
        },
    )
    .await
    .unwrap();
    let activity = ActivityRepo::create(
        &pool,
        owner,
        &CreateActivity {
            lead_id: Some(lead.id),
            activity_type: "call".into(),
            notes: Some("Left a message".into()),
            scheduled_at: None,
            completed: None,
        },
    )
    .await
    .unwrap();

    let contact = ContactRepo::update(
        &pool,
        owner,
        contact.id,
        &UpdateContact {
            lead_id: Some(None),
            company: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(contact.lead_id, None);
    assert_eq!(contact.company, None);
    assert_eq!(contact.name, "Assistant");

    let activity = ActivityRepo::update(
        &pool,
        owner,
        activity.id,
        &UpdateActivity {
            lead_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(activity.lead_id, None);
    assert_eq!(activity.notes.as_deref(), Some("Left a message"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn form_description_can_be_cleared(pool: PgPool) {
    let owner = user(&pool, "forms@example.com").await;
    let form = LeadFormRepo::create(
        &pool,
        owner,
        &CreateLeadForm {
            title: "Webinar".into(),
            description: Some("Spring session".into()),
            source: Some("webinar".into()),
            is_active: None,
        },
    )
    .await
    .unwrap();

    let updated = LeadFormRepo::update(
        &pool,
        owner,
        form.id,
        &UpdateLeadForm {
            description: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.description, None);
    assert_eq!(updated.title, "Webinar");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_violates_check_constraint(pool: PgPool) {
    let owner = user(&pool, "ck@example.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("Check")).await.unwrap();

    let err = LeadRepo::update_status(&pool, owner, lead.id, "archived")
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23514"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_lead_cascades_activities_and_unlinks_contacts(pool: PgPool) {
    let owner = user(&pool, "cascade@example.com").await;
    let lead = LeadRepo::create(&pool, owner, &new_lead("Doomed")).await.unwrap();

    let contact = ContactRepo::create(
        &pool,
        owner,
        &CreateContact {
            name: "Assistant".into(),
            email: "assistant@example.com".into(),
            phone: "555-0100".into(),
            company: None,
            position: None,
            lead_id: Some(lead.id),
        },
    )
    .await
    .unwrap();
    let activity = ActivityRepo::create(
        &pool,
        owner,
        &CreateActivity {
            lead_id: Some(lead.id),
            activity_type: "call".into(),
            notes: None,
            scheduled_at: None,
            completed: None,
        },
    )
    .await
    .unwrap();
    assert!(!activity.completed);

    let deleted = LeadRepo::delete(&pool, owner, lead.id)
        .await
        .unwrap()
        .expect("lead existed");
    assert_eq!(deleted.contact_ids, vec![contact.id]);
    assert_eq!(deleted.activity_ids, vec![activity.id]);

    assert!(ActivityRepo::find_by_id(&pool, owner, activity.id)
        .await
        .unwrap()
        .is_none());
    let contact = ContactRepo::find_by_id(&pool, owner, contact.id)
        .await
        .unwrap()
        .expect("contact survives its lead");
    assert_eq!(contact.lead_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn email_uniqueness_is_case_insensitive(pool: PgPool) {
    user(&pool, "dup@example.com").await;
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            email: "DUP@example.com".into(),
            password_hash: "x".into(),
            full_name: None,
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_cleanup_removes_expired_and_revoked(pool: PgPool) {
    let owner = user(&pool, "s@example.com").await;
    let now = chrono::Utc::now();

    for (hash, expires_at) in [
        ("live", now + chrono::Duration::days(1)),
        ("expired", now - chrono::Duration::days(1)),
        ("revoked", now + chrono::Duration::days(1)),
    ] {
        SessionRepo::create(
            &pool,
            &CreateSession {
                user_id: owner,
                refresh_token_hash: hash.into(),
                expires_at,
            },
        )
        .await
        .unwrap();
    }
    assert!(SessionRepo::claim(&pool, "revoked").await.unwrap().is_some());
    assert!(SessionRepo::claim(&pool, "expired").await.unwrap().is_none());

    assert_eq!(SessionRepo::cleanup_expired(&pool).await.unwrap(), 2);
    assert!(SessionRepo::claim(&pool, "live").await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn refresh_token_can_be_claimed_once(pool: PgPool) {
    let owner = user(&pool, "once@example.com").await;
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: owner,
            refresh_token_hash: "single-use".into(),
            expires_at: chrono::Utc::now() + chrono::Duration::days(1),
        },
    )
    .await
    .unwrap();

    let (first, second) = tokio::join!(
        SessionRepo::claim(&pool, "single-use"),
        SessionRepo::claim(&pool, "single-use"),
    );
    let claimed = [first.unwrap(), second.unwrap()]
        .into_iter()
        .filter(Option::is_some)
        .count();
    assert_eq!(claimed, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lockout_resets_failure_counter(pool: PgPool) {
    let id = user(&pool, "locky@example.com").await;
    let until = chrono::Utc::now() + chrono::Duration::minutes(15);

    for _ in 0..4 {
        assert!(!UserRepo::record_failed_login(&pool, id, 5, until).await.unwrap());
    }
    assert!(UserRepo::record_failed_login(&pool, id, 5, until).await.unwrap());

    let locked = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(locked.failed_login_count, 0);
    assert!(locked.locked_until.is_some());

    // One more miss after the lock lapses does not lock again.
    assert!(!UserRepo::record_failed_login(&pool, id, 5, until).await.unwrap());
    let after = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(after.failed_login_count, 1);
}
