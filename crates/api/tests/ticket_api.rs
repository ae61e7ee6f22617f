//! HTTP-level integration tests for the ticket endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create(pool: &PgPool, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/tickets", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn seed(pool: &PgPool) {
    for body in [
        json!({"title": "Refund request", "description": "Please send my money back",
               "category": "billing", "priority": "high"}),
        json!({"title": "Invoice missing", "description": "Where is my Refund confirmation?",
               "category": "billing", "priority": "low", "status": "in_progress"}),
        json!({"title": "App crashes", "description": "Crash on startup",
               "category": "technical", "priority": "critical"}),
        json!({"title": "Change email", "description": "Update my account email",
               "category": "account", "priority": "low", "status": "closed"}),
    ] {
        create(pool, body).await;
    }
}

async fn list(pool: &PgPool, query: &str) -> Vec<Value> {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/tickets{query}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await.as_array().unwrap().clone()
}

fn titles(tickets: &[Value]) -> Vec<&str> {
    tickets.iter().map(|t| t["title"].as_str().unwrap()).collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_ticket_returns_201_with_default_status(pool: PgPool) {
    let json = create(
        &pool,
        json!({"title": "Cannot log in", "description": "Password reset fails",
               "category": "account", "priority": "medium"}),
    )
    .await;

    assert!(json["id"].is_number());
    assert_eq!(json["title"], "Cannot log in");
    assert_eq!(json["status"], "open");
    assert!(json["created_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_ticket_with_explicit_status(pool: PgPool) {
    let json = create(
        &pool,
        json!({"title": "T", "description": "D", "category": "general",
               "priority": "low", "status": "resolved"}),
    )
    .await;
    assert_eq!(json["status"], "resolved");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_ticket_rejects_invalid_fields(pool: PgPool) {
    let cases = [
        json!({"title": "", "description": "D", "category": "general", "priority": "low"}),
        json!({"title": "T", "description": "  ", "category": "general", "priority": "low"}),
        json!({"title": "T", "description": "D", "category": "sales", "priority": "low"}),
        json!({"title": "T", "description": "D", "category": "general", "priority": "urgent"}),
        json!({"title": "T", "description": "D", "category": "general", "priority": "low",
               "status": "archived"}),
        json!({"title": "x".repeat(201), "description": "D", "category": "general",
               "priority": "low"}),
    ];

    for body in cases {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/v1/tickets", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    assert!(list(&pool, "").await.is_empty());
}

// ---------------------------------------------------------------------------
// Retrieve / update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_ticket_by_id(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "Get me", "description": "D", "category": "general", "priority": "low"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/tickets/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "Get me");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_nonexistent_ticket_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tickets/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Ticket with id 999999 not found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_replaces_fields_and_keeps_created_at(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "Original", "description": "D", "category": "general", "priority": "low",
               "status": "in_progress"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/tickets/{id}"),
        json!({"title": "Updated", "description": "New text", "category": "technical",
               "priority": "critical", "created_at": "2000-01-01T00:00:00Z"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Updated");
    assert_eq!(json["category"], "technical");
    assert_eq!(json["priority"], "critical");
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["created_at"], created["created_at"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_put_requires_all_editable_fields(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "T", "description": "D", "category": "general", "priority": "low"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(app, &format!("/api/v1/tickets/{id}"), json!({"title": "Only"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("description"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_missing_field_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/tickets", json!({"title": "only"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("missing field"));

    assert!(list(&pool, "").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_with_wrong_field_type_returns_json_400(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "T", "description": "D", "category": "general", "priority": "low"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(app, &format!("/api/v1/tickets/{id}"), json!({"status": 3})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_changes_status_only(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "T", "description": "D", "category": "billing", "priority": "high"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json(
        app,
        &format!("/api/v1/tickets/{id}"),
        json!({"status": "resolved"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "resolved");
    assert_eq!(json["title"], "T");
    assert_eq!(json["category"], "billing");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_rejects_invalid_status(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "T", "description": "D", "category": "billing", "priority": "high"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json(
        app,
        &format!("/api/v1/tickets/{id}"),
        json!({"status": "done"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/api/v1/tickets/{id}")).await).await;
    assert_eq!(json["status"], "open");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_nonexistent_ticket_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = patch_json(app, "/api/v1/tickets/999999", json!({"status": "closed"})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_ticket_returns_204_then_404(pool: PgPool) {
    let created = create(
        &pool,
        json!({"title": "Delete me", "description": "D", "category": "general", "priority": "low"}),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/tickets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/tickets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    let response = delete(app, &format!("/api/v1/tickets/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// List / filter
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_all_newest_first(pool: PgPool) {
    seed(&pool).await;

    let all = list(&pool, "").await;
    assert_eq!(
        titles(&all),
        vec!["Change email", "App crashes", "Invoice missing", "Refund request"]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filter_by_category(pool: PgPool) {
    seed(&pool).await;

    let billing = list(&pool, "?category=billing").await;
    assert_eq!(billing.len(), 2);
    assert!(billing.iter().all(|t| t["category"] == "billing"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_combined_filters_intersect(pool: PgPool) {
    seed(&pool).await;

    let result = list(&pool, "?category=billing&status=in_progress").await;
    assert_eq!(titles(&result), vec!["Invoice missing"]);

    let result = list(&pool, "?priority=low&status=closed").await;
    assert_eq!(titles(&result), vec!["Change email"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_search_matches_title_or_description(pool: PgPool) {
    seed(&pool).await;

    let result = list(&pool, "?search=refund").await;
    assert_eq!(titles(&result), vec!["Invoice missing", "Refund request"]);

    let result = list(&pool, "?search=CRASH").await;
    assert_eq!(titles(&result), vec!["App crashes"]);

    let result = list(&pool, "?search=nothing%20like%20this").await;
    assert!(result.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_filter_value_returns_empty_list(pool: PgPool) {
    seed(&pool).await;

    assert!(list(&pool, "?category=sales").await.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_blank_filter_values_are_ignored(pool: PgPool) {
    seed(&pool).await;

    assert_eq!(list(&pool, "?category=&search=").await.len(), 4);
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_on_empty_store(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/tickets/stats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_tickets"], 0);
    assert_eq!(json["open_tickets"], 0);
    assert_eq!(json["avg_tickets_per_day"], 0.0);
    assert_eq!(
        json["priority_breakdown"],
        json!({"low": 0, "medium": 0, "high": 0, "critical": 0})
    );
    assert_eq!(
        json["category_breakdown"],
        json!({"billing": 0, "technical": 0, "account": 0, "general": 0})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_counts_and_breakdowns(pool: PgPool) {
    seed(&pool).await;

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/tickets/stats").await).await;

    assert_eq!(json["total_tickets"], 4);
    assert_eq!(json["open_tickets"], 2);
    assert_eq!(json["avg_tickets_per_day"], 4.0);
    assert_eq!(
        json["priority_breakdown"],
        json!({"low": 2, "medium": 0, "high": 1, "critical": 1})
    );
    assert_eq!(
        json["category_breakdown"],
        json!({"billing": 2, "technical": 1, "account": 1, "general": 0})
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_stats_average_uses_days_since_first_ticket(pool: PgPool) {
    seed(&pool).await;
    sqlx::query(
        "UPDATE tickets SET created_at = NOW() - INTERVAL '8 days 2 hours' \
         WHERE title = 'Refund request'",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/tickets/stats").await).await;

    // 4 tickets over 8 whole days.
    assert_eq!(json["avg_tickets_per_day"], 0.5);
}
