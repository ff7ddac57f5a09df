//! HTTP-level integration tests for the `/leads` resource.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{
    body_json, create_lead, delete_auth, get_auth, patch_json_auth, post_json_auth,
    put_json_auth, signup_user,
};
use salesdesk_events::{ChangeOp, ChangeTable, EventBus};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_lead_defaults_and_list(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = signup_user(app.clone(), "owner@example.com").await;

    let lead = create_lead(app.clone(), &token, json!({ "full_name": "  Ada Lovelace " })).await;
    assert_eq!(lead["full_name"], "Ada Lovelace");
    assert_eq!(lead["status"], "new");
    assert_eq!(lead["source"], "manual");
    assert_eq!(lead["value_cents"], 0);
    assert_eq!(lead["owner_id"], user_id);

    let response = get_auth(app, "/api/v1/leads", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], lead["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_lead_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "v@example.com").await;

    for body in [
        json!({ "full_name": "   " }),
        json!({ "full_name": "Bob", "value_cents": -1 }),
        json!({ "full_name": "Bob", "status": "archived" }),
        json!({ "full_name": "Bob", "email": "not-an-email" }),
        json!({ "full_name": "Bob", "phone": "call me maybe" }),
    ] {
        let response = post_json_auth(app.clone(), "/api/v1/leads", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_leads_are_isolated_per_owner(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, alice) = signup_user(app.clone(), "alice@example.com").await;
    let (_, mallory) = signup_user(app.clone(), "mallory@example.com").await;

    let lead = create_lead(app.clone(), &alice, json!({ "full_name": "Private" })).await;
    let uri = format!("/api/v1/leads/{}", lead["id"]);

    let response = get_auth(app.clone(), &uri, &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(app.clone(), &uri, json!({ "full_name": "Stolen" }), &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = patch_json_auth(
        app.clone(),
        &format!("{uri}/status"),
        json!({ "status": "won" }),
        &mallory,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app.clone(), &uri, &mallory).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(get_auth(app.clone(), "/api/v1/leads", &mallory).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());

    // Still intact for its owner.
    let json = body_json(get_auth(app, &uri, &alice).await).await;
    assert_eq!(json["full_name"], "Private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_is_partial(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "u@example.com").await;
    let lead = create_lead(
        app.clone(),
        &token,
        json!({ "full_name": "Grace", "source": "referral", "value_cents": 5000 }),
    )
    .await;
    let uri = format!("/api/v1/leads/{}", lead["id"]);

    let response = put_json_auth(app, &uri, json!({ "job_title": "Admiral" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["job_title"], "Admiral");
    assert_eq!(json["full_name"], "Grace");
    assert_eq!(json["source"], "referral");
    assert_eq!(json["value_cents"], 5000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_nullable_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "clear@example.com").await;
    let lead = create_lead(
        app.clone(),
        &token,
        json!({ "full_name": "Hedy", "description": "old note", "email": "a@b.co", "job_title": "Inventor" }),
    )
    .await;
    let uri = format!("/api/v1/leads/{}", lead["id"]);

    let response = put_json_auth(app, &uri, json!({ "description": null, "email": "" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["description"].is_null());
    assert!(json["email"].is_null());
    assert_eq!(json["job_title"], "Inventor");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_change_any_to_any(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let mut rx = bus.subscribe();
    let app = common::build_test_app_with_bus(pool, Arc::clone(&bus));
    let (user_id, token) = signup_user(app.clone(), "kanban@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Mover" })).await;
    let uri = format!("/api/v1/leads/{}/status", lead["id"]);

    let inserted = rx.recv().await.unwrap();
    assert_eq!(inserted.op, ChangeOp::Insert);

    // Jump straight to a terminal stage and back again.
    for status in ["won", "new", "negotiation", "lost"] {
        let response = patch_json_auth(app.clone(), &uri, json!({ "status": status }), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], status);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.table, ChangeTable::Leads);
        assert_eq!(event.op, ChangeOp::Update);
        assert_eq!(event.owner_id, user_id);
    }

    let response = patch_json_auth(app, &uri, json!({ "status": "archived" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_matches!(
        rx.try_recv(),
        Err(tokio::sync::broadcast::error::TryRecvError::Empty)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_search_and_sort(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "f@example.com").await;

    create_lead(
        app.clone(),
        &token,
        json!({ "full_name": "Ada", "source": "web", "value_cents": 300, "status": "qualified" }),
    )
    .await;
    create_lead(
        app.clone(),
        &token,
        json!({ "full_name": "Bob", "source": "referral", "value_cents": 100, "job_title": "CTO" }),
    )
    .await;
    create_lead(
        app.clone(),
        &token,
        json!({ "full_name": "Cy 100%", "source": "web", "value_cents": 200 }),
    )
    .await;

    let names = |json: serde_json::Value| -> Vec<String> {
        json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["full_name"].as_str().unwrap().to_string())
            .collect()
    };

    let json = body_json(get_auth(app.clone(), "/api/v1/leads?source=web&sort=value&order=asc", &token).await).await;
    assert_eq!(names(json), ["Cy 100%", "Ada"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/leads?status=qualified", &token).await).await;
    assert_eq!(names(json), ["Ada"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/leads?search=cto", &token).await).await;
    assert_eq!(names(json), ["Bob"]);

    // `%` is matched literally.
    let json = body_json(get_auth(app.clone(), "/api/v1/leads?search=100%25", &token).await).await;
    assert_eq!(names(json), ["Cy 100%"]);

    let json = body_json(get_auth(app.clone(), "/api/v1/leads?sort=full_name&limit=2", &token).await).await;
    assert_eq!(names(json), ["Cy 100%", "Bob"]);

    let response = get_auth(app.clone(), "/api/v1/leads?sort=shoe_size", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get_auth(app, "/api/v1/leads?status=archived", &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sort_by_status_follows_pipeline(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "stages@example.com").await;

    for (name, status) in [("W", "won"), ("N", "new"), ("P", "proposal"), ("C", "contacted")] {
        create_lead(app.clone(), &token, json!({ "full_name": name, "status": status })).await;
    }

    let json = body_json(get_auth(app, "/api/v1/leads?sort=status&order=asc", &token).await).await;
    let statuses: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses, ["new", "contacted", "proposal", "won"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_lead(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "d@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Gone" })).await;
    let uri = format!("/api/v1/leads/{}", lead["id"]);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_lead_announces_dependent_rows(pool: PgPool) {
    let bus = Arc::new(EventBus::default());
    let app = common::build_test_app_with_bus(pool, Arc::clone(&bus));
    let (user_id, token) = signup_user(app.clone(), "fanout@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Hub" })).await;
    let lead_id = lead["id"].as_i64().unwrap();

    let contact = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/contacts",
            json!({ "name": "Assistant", "email": "a@hub.io", "phone": "555-0101", "lead_id": lead_id }),
            &token,
        )
        .await,
    )
    .await;
    let activity = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/activities",
            json!({ "activity_type": "call", "lead_id": lead_id }),
            &token,
        )
        .await,
    )
    .await;

    let mut rx = bus.subscribe();
    let response = delete_auth(app, &format!("/api/v1/leads/{lead_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        assert_eq!(event.owner_id, user_id);
        events.push((event.table, event.op, event.id));
    }
    assert_eq!(
        events,
        [
            (ChangeTable::Leads, ChangeOp::Delete, lead_id),
            (ChangeTable::Contacts, ChangeOp::Update, contact["id"].as_i64().unwrap()),
            (ChangeTable::Activities, ChangeOp::Delete, activity["id"].as_i64().unwrap()),
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lead_sub_resources(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "sub@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Hub" })).await;
    let lead_id = lead["id"].as_i64().unwrap();

    post_json_auth(
        app.clone(),
        "/api/v1/contacts",
        json!({ "name": "Assistant", "email": "a@hub.io", "phone": "555-0101", "lead_id": lead_id }),
        &token,
    )
    .await;
    post_json_auth(
        app.clone(),
        "/api/v1/activities",
        json!({ "activity_type": "call", "lead_id": lead_id }),
        &token,
    )
    .await;

    let json = body_json(get_auth(app.clone(), &format!("/api/v1/leads/{lead_id}/contacts"), &token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = body_json(get_auth(app.clone(), &format!("/api/v1/leads/{lead_id}/activities"), &token).await).await;
    assert_eq!(json["data"][0]["activity_type"], "call");

    let response = get_auth(app, "/api/v1/leads/999999/contacts", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
