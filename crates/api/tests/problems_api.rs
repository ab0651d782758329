//! HTTP-level integration tests for problems and the dashboard counters
//! they drive.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_auth, post_json_auth, put_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_problem(app: &axum::Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/problems", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

fn two_sum(status: &str) -> Value {
    json!({
        "title": "Two Sum",
        "link": "https://leetcode.com/problems/two-sum",
        "topic": "Arrays",
        "platform": "LeetCode",
        "status": status,
    })
}

async fn dashboard(app: &axum::Router, token: &str) -> (i64, i64, i64) {
    let response = get_auth(app.clone(), "/api/v1/dashboard", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    (
        data["total_problems"].as_i64().unwrap(),
        data["revised_this_week"].as_i64().unwrap(),
        data["remaining_to_revise"].as_i64().unwrap(),
    )
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_applies_defaults(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (user_id, token) = common::register_and_login(&app, "a@example.com").await;

    let problem = create_problem(
        &app,
        &token,
        json!({ "title": "  Valid Anagram ", "link": "https://x", "topic": "Strings" }),
    )
    .await;

    assert_eq!(problem["title"], "Valid Anagram");
    assert_eq!(problem["difficulty"], "Medium");
    assert_eq!(problem["status"], "Unsolved");
    assert_eq!(problem["platform"], "");
    assert_eq!(problem["user_id"], user_id);
    assert_eq!(problem["tags"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_rejects_missing_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "a@example.com").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/problems",
        json!({ "title": "No link", "topic": "Arrays" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // Nothing was counted.
    assert_eq!(dashboard(&app, &token).await, (0, 0, 0));
}

/// Create Unsolved, solve it, revert it, delete it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn lifecycle_drives_dashboard_counters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "u@example.com").await;

    let problem = create_problem(&app, &token, two_sum("Unsolved")).await;
    let uri = format!("/api/v1/problems/{}", problem["id"]);
    assert_eq!(dashboard(&app, &token).await, (1, 0, 1));

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "Solved" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(dashboard(&app, &token).await, (1, 1, 0));

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "Unsolved" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(dashboard(&app, &token).await, (1, 1, 1));

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], problem["id"]);
    assert_eq!(json["data"]["deleted"], true);
    assert_eq!(dashboard(&app, &token).await, (0, 1, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn note_only_update_leaves_counters(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "n@example.com").await;

    let problem = create_problem(&app, &token, two_sum("Solved")).await;
    let uri = format!("/api/v1/problems/{}", problem["id"]);

    let response = put_json_auth(app.clone(), &uri, json!({ "note": "  use a map  " }), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["note"], "use a map");
    assert_eq!(json["data"]["status"], "Solved");
    assert_eq!(dashboard(&app, &token).await, (1, 1, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_rejects_unknown_status(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "s@example.com").await;

    let problem = create_problem(&app, &token, two_sum("Unsolved")).await;
    let uri = format!("/api/v1/problems/{}", problem["id"]);

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "Done" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(dashboard(&app, &token).await, (1, 0, 1));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_owner_is_forbidden_and_nothing_changes(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, owner) = common::register_and_login(&app, "owner@example.com").await;
    let (_, other) = common::register_and_login(&app, "other@example.com").await;

    let problem = create_problem(&app, &owner, two_sum("Unsolved")).await;
    let uri = format!("/api/v1/problems/{}", problem["id"]);

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "Solved" }), &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Reads by a non-owner look like a missing record.
    let response = get_auth(app.clone(), &uri, &other).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), &uri, &owner).await;
    assert_eq!(body_json(response).await["data"]["status"], "Unsolved");
    assert_eq!(dashboard(&app, &owner).await, (1, 0, 1));
    assert_eq!(dashboard(&app, &other).await, (0, 0, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_problem_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "m@example.com").await;

    for response in [
        get_auth(app.clone(), "/api/v1/problems/999999", &token).await,
        put_json_auth(app.clone(), "/api/v1/problems/999999", json!({ "note": "x" }), &token).await,
        delete_auth(app.clone(), "/api/v1/problems/999999", &token).await,
    ] {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_owner_scoped_and_searchable(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "l@example.com").await;
    let (_, other) = common::register_and_login(&app, "o@example.com").await;

    for title in ["Two Sum", "Three Sum", "100% Coverage"] {
        create_problem(
            &app,
            &token,
            json!({ "title": title, "link": "https://x", "topic": "Arrays" }),
        )
        .await;
    }
    create_problem(
        &app,
        &other,
        json!({ "title": "Sum of Others", "link": "https://x", "topic": "Arrays" }),
    )
    .await;

    let response = get_auth(app.clone(), "/api/v1/problems?name=sum", &token).await;
    let titles: Vec<String> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Three Sum", "Two Sum"]);

    let response = get_auth(app.clone(), "/api/v1/problems?name=%25", &token).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    assert_eq!(data[0]["title"], "100% Coverage");

    let response = get_auth(app.clone(), "/api/v1/problems?name=%20%20", &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn resync_overwrites_with_row_counts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "r@example.com").await;

    let problem = create_problem(&app, &token, two_sum("Solved")).await;
    create_problem(&app, &token, two_sum("Unsolved")).await;
    let uri = format!("/api/v1/problems/{}", problem["id"]);
    put_json_auth(app.clone(), &uri, json!({ "status": "Needs Review" }), &token).await;
    // Deltas keep the earlier solve counted.
    assert_eq!(dashboard(&app, &token).await, (2, 1, 2));

    let response = post_auth(app.clone(), "/api/v1/dashboard/resync", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = body_json(response).await["data"].clone();
    assert_eq!(first["total_problems"], 2);
    assert_eq!(first["revised_this_week"], 0);
    assert_eq!(first["remaining_to_revise"], 2);

    let response = post_auth(app.clone(), "/api/v1/dashboard/resync", &token).await;
    let second = body_json(response).await["data"].clone();
    assert_eq!(first["total_problems"], second["total_problems"]);
    assert_eq!(first["revised_this_week"], second["revised_this_week"]);
    assert_eq!(first["remaining_to_revise"], second["remaining_to_revise"]);
    assert_eq!(first["total_topics"], second["total_topics"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_dashboard_is_zeros(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_, token) = common::register_and_login(&app, "z@example.com").await;

    let response = get_auth(app, "/api/v1/dashboard", &token).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["total_problems"], 0);
    assert_eq!(data["total_topics"], 0);
    assert!(data["week_start"].is_null());
}

/// Counter bookkeeping failures are logged and swallowed: the problem
/// mutations themselves still succeed.
#[sqlx::test(migrations = "../../db/migrations")]
async fn mutations_succeed_when_counters_are_unavailable(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_, token) = common::register_and_login(&app, "d@example.com").await;

    sqlx::query("DROP TABLE dashboard_counters")
        .execute(&pool)
        .await
        .unwrap();

    let problem = create_problem(&app, &token, two_sum("Unsolved")).await;
    let id = problem["id"].as_i64().unwrap();
    let uri = format!("/api/v1/problems/{id}");

    let response = put_json_auth(app.clone(), &uri, json!({ "status": "Solved" }), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "Solved");

    let stored: (String,) = sqlx::query_as("SELECT status FROM problems WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored.0, "Solved");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let remaining: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM problems WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining.0, 0);
}
