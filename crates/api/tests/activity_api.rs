//! HTTP-level integration tests for the `/activities` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_lead, delete_auth, get_auth, post_json_auth, put_json_auth, signup_user,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_lifecycle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "act@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Prospect" })).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/activities",
        json!({
            "activity_type": "Meeting",
            "lead_id": lead["id"],
            "notes": "Demo",
            "scheduled_at": "2026-11-02T15:00:00Z",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let activity = body_json(response).await;
    assert_eq!(activity["activity_type"], "meeting");
    assert_eq!(activity["completed"], false);
    let uri = format!("/api/v1/activities/{}", activity["id"]);

    let response = post_json_auth(app.clone(), &format!("{uri}/complete"), json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["completed"], true);

    let response = post_json_auth(
        app.clone(),
        &format!("{uri}/complete"),
        json!({ "completed": false }),
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["completed"], false);

    let response = put_json_auth(app.clone(), &uri, json!({ "notes": "Demo moved" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["notes"], "Demo moved");
    assert_eq!(json["activity_type"], "meeting");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_rejects_unknown_type(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "fax@example.com").await;

    let response = post_json_auth(
        app,
        "/api/v1/activities",
        json!({ "activity_type": "fax" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_list_filters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "filter@example.com").await;
    let a = create_lead(app.clone(), &token, json!({ "full_name": "A" })).await;
    let b = create_lead(app.clone(), &token, json!({ "full_name": "B" })).await;

    for (lead, completed) in [(&a, true), (&a, false), (&b, false)] {
        let response = post_json_auth(
            app.clone(),
            "/api/v1/activities",
            json!({ "activity_type": "task", "lead_id": lead["id"], "completed": completed }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let count = |json: serde_json::Value| json["data"].as_array().unwrap().len();

    let uri = format!("/api/v1/activities?lead_id={}", a["id"]);
    assert_eq!(count(body_json(get_auth(app.clone(), &uri, &token).await).await), 2);

    let uri = format!("/api/v1/activities?lead_id={}&completed=false", a["id"]);
    assert_eq!(count(body_json(get_auth(app.clone(), &uri, &token).await).await), 1);

    let uri = "/api/v1/activities?completed=false";
    assert_eq!(count(body_json(get_auth(app, uri, &token).await).await), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_activity_can_be_unlinked_from_lead(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = signup_user(app.clone(), "unlink@example.com").await;
    let lead = create_lead(app.clone(), &token, json!({ "full_name": "Prospect" })).await;

    let activity = body_json(
        post_json_auth(
            app.clone(),
            "/api/v1/activities",
            json!({ "activity_type": "email", "lead_id": lead["id"], "notes": "Sent deck" }),
            &token,
        )
        .await,
    )
    .await;
    let uri = format!("/api/v1/activities/{}", activity["id"]);

    let response = put_json_auth(app.clone(), &uri, json!({ "lead_id": null }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["lead_id"].is_null());
    assert_eq!(json["notes"], "Sent deck");

    let response = put_json_auth(app, &uri, json!({ "notes": null }), &token).await;
    assert!(body_json(response).await["notes"].is_null());
}
