//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use bookshelf::api;
use serde_json::{json, Value};

use crate::support::{service, TestService};

/// Bind to port 0 and return the actual address.
async fn start_server(service: TestService) -> String {
    let app = api::router(Arc::new(service));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn register(client: &reqwest::Client, base: &str, username: &str) -> String {
    let resp = client
        .post(format!("{base}/users.register"))
        .json(&json!({ "username": username, "email": format!("{username}@example.com") }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_lists_commands() {
    let base = start_server(service()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 22);
    assert!(commands.iter().any(|c| c == "users.feed"));
}

#[tokio::test]
async fn add_and_list_with_user_header() {
    let base = start_server(service()).await;
    let client = reqwest::Client::new();
    let ada = register(&client, &base, "ada").await;

    let resp = client
        .post(format!("{base}/books.add"))
        .header("x-user-id", &ada)
        .json(&json!({ "title": "Dune", "rating": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Empty body is an empty input object.
    let resp = client
        .post(format!("{base}/books.list"))
        .header("x-user-id", &ada)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body[0]["title"], "Dune");
}

#[tokio::test]
async fn status_codes() {
    let base = start_server(service()).await;
    let client = reqwest::Client::new();
    let ada = register(&client, &base, "ada").await;
    let bob = register(&client, &base, "bob").await;

    let resp = client.post(format!("{base}/books.list")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .post(format!("{base}/no.such.command"))
        .header("x-user-id", &ada)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .post(format!("{base}/books.add"))
        .header("x-user-id", &ada)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .post(format!("{base}/books.add"))
        .header("x-user-id", &ada)
        .json(&json!({ "title": "Dune" }))
        .send()
        .await
        .unwrap();
    let entry: Value = resp.json().await.unwrap();

    let resp = client
        .post(format!("{base}/books.update"))
        .header("x-user-id", &bob)
        .json(&json!({ "id": entry["id"], "rating": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("another user"));
}
