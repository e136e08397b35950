use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;

async fn test_app() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    server::app(engine)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn add_member(app: &Router, name: &str) -> String {
    let (status, body) = send(app, "POST", "/members", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn empty_group_returns_empty_collections() {
    let app = test_app().await;

    let (status, body) = send(&app, "GET", "/balances", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "balances": [] }));

    let (status, body) = send(&app, "GET", "/settlements", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "settlements": [] }));
}

#[tokio::test]
async fn dinner_split_equally_produces_two_settlements() {
    let app = test_app().await;
    let alice = add_member(&app, "Alice").await;
    let bob = add_member(&app, "Bob").await;
    let carol = add_member(&app, "Carol").await;

    let (status, body) = send(
        &app,
        "POST",
        "/expenses/equal",
        Some(json!({
            "description": "Dinner",
            "amount_minor": 9000,
            "payer_id": alice,
            "member_ids": [alice, bob, carol],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["payer_name"], "Alice");
    assert_eq!(body["splits"].as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/balances", None).await;
    let balances: Vec<(String, i64)> = body["balances"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| {
            (
                b["member_name"].as_str().unwrap().to_string(),
                b["balance_minor"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        balances,
        vec![
            ("Alice".to_string(), 6000),
            ("Bob".to_string(), -3000),
            ("Carol".to_string(), -3000),
        ]
    );

    let (_, body) = send(&app, "GET", "/settlements", None).await;
    let settlements = body["settlements"].as_array().unwrap();
    assert_eq!(settlements.len(), 2);
    for settlement in settlements {
        assert_eq!(settlement["to_member_id"], alice.as_str());
        assert_eq!(settlement["amount_minor"], 3000);
    }
}

#[tokio::test]
async fn custom_splits_must_match_amount() {
    let app = test_app().await;
    let alice = add_member(&app, "Alice").await;
    let bob = add_member(&app, "Bob").await;

    let (status, body) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "description": "Taxi",
            "amount_minor": 1000,
            "payer_id": alice,
            "splits": [
                { "member_id": alice, "amount_minor": 500 },
                { "member_id": bob, "amount_minor": 400 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("sum"));

    let (status, body) = send(
        &app,
        "POST",
        "/expenses",
        Some(json!({
            "description": "Taxi",
            "amount_minor": 1000,
            "payer_id": alice,
            "splits": [
                { "member_id": alice, "amount_minor": 300 },
                { "member_id": bob, "amount_minor": 700 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount_minor"], 1000);

    let (_, body) = send(&app, "GET", "/expenses", None).await;
    assert_eq!(body["expenses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn blank_member_name_is_rejected() {
    let app = test_app().await;

    let (status, body) = send(&app, "POST", "/members", Some(json!({ "name": "   " }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_payer_is_not_found() {
    let app = test_app().await;
    let alice = add_member(&app, "Alice").await;
    let ghost = uuid::Uuid::new_v4().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/expenses/equal",
        Some(json!({
            "description": "Lunch",
            "amount_minor": 1200,
            "payer_id": ghost,
            "member_ids": [alice],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn member_with_expenses_cannot_be_deleted() {
    let app = test_app().await;
    let alice = add_member(&app, "Alice").await;
    let bob = add_member(&app, "Bob").await;

    let (_, expense) = send(
        &app,
        "POST",
        "/expenses/equal",
        Some(json!({
            "description": "Groceries",
            "amount_minor": 2000,
            "payer_id": alice,
            "member_ids": [alice, bob],
        })),
    )
    .await;

    let (status, _) = send(&app, "DELETE", &format!("/members/{bob}"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let expense_id = expense["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/expenses/{expense_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/members/{bob}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/members", None).await;
    assert_eq!(body["members"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_unknown_ids() {
    let app = test_app().await;
    let missing = uuid::Uuid::new_v4();

    let (status, _) = send(&app, "DELETE", &format!("/expenses/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/members/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let app = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/members")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "POST", "/expenses", Some(json!({ "description": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn oversized_amount_is_rejected() {
    let app = test_app().await;
    let alice = add_member(&app, "Alice").await;

    let (status, body) = send(
        &app,
        "POST",
        "/expenses/equal",
        Some(json!({
            "description": "Yacht",
            "amount_minor": i64::MAX / 2 + 1,
            "payer_id": alice,
            "member_ids": [alice],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("must not exceed"));

    let (status, _) = send(&app, "GET", "/balances", None).await;
    assert_eq!(status, StatusCode::OK);
}
