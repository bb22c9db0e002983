//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use blackboard::http::{self, BASE_PATH};
use blackboard::{BoardService, InMemoryBoardStore, ManualClock, Validator};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL of the board API.
async fn start_server(clock: ManualClock) -> String {
    let service = Arc::new(BoardService::with_clock(InMemoryBoardStore::new(), clock));
    let app = http::router(service, Validator::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}{BASE_PATH}")
}

async fn create(client: &reqwest::Client, base: &str, name: &str, ttl: i64) -> reqwest::Response {
    client
        .post(format!("{base}/create"))
        .json(&json!({ "name": name, "ttlSeconds": ttl }))
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_display_and_read() {
    let base = start_server(ManualClock::new(5_000)).await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, "lobby", 30).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "name": "lobby",
            "data": "",
            "ttlSeconds": 30,
            "lastUpdated": 5_000,
            "status": "VALID",
        })
    );

    let resp = client
        .put(format!("{base}/display/lobby"))
        .json(&json!({ "data": "standup at 10" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = client
        .get(format!("{base}/read/lobby"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"], "standup at 10");
}

#[tokio::test]
async fn duplicate_create_is_conflict() {
    let base = start_server(ManualClock::new(0)).await;
    let client = reqwest::Client::new();

    assert_eq!(create(&client, &base, "lobby", 0).await.status(), StatusCode::OK);
    let resp = create(&client, &base, "lobby", 0).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Blackboard already exists");
    assert_eq!(body["details"][0], "Blackboard with name 'lobby' already exists");
}

#[tokio::test]
async fn unknown_board_is_not_found() {
    let base = start_server(ManualClock::new(0)).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/read/ghost")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Resource not found");

    let resp = client.put(format!("{base}/clear/ghost")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.delete(format!("{base}/delete/ghost")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_requests_are_rejected() {
    let base = start_server(ManualClock::new(0)).await;
    let client = reqwest::Client::new();

    let resp = create(&client, &base, "ab", -1).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Validation failed");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);

    create(&client, &base, "lobby", 0).await;
    let resp = client
        .put(format!("{base}/display/lobby"))
        .json(&json!({ "data": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(format!("{base}/create"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clear_list_and_delete() {
    let base = start_server(ManualClock::new(0)).await;
    let client = reqwest::Client::new();

    for name in ["alpha", "beta", "gamma"] {
        create(&client, &base, name, 10).await;
    }

    let resp = client.put(format!("{base}/clear/beta")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let boards: Vec<Value> = client
        .get(format!("{base}/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(boards.len(), 3);
    let beta = boards.iter().find(|b| b["name"] == "beta").unwrap();
    assert_eq!(beta["status"], "INVALID");

    let resp = client.delete(format!("{base}/delete/alpha")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client.delete(format!("{base}/delete/all")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let boards: Vec<Value> = client
        .get(format!("{base}/list"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(boards.is_empty());
}
