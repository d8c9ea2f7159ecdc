mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use kv_shortener::api::handlers::{redirect_handler, stats_handler, stats_list_handler};

fn server(state: kv_shortener::AppState) -> TestServer {
    let app = Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/api/stats", get(stats_list_handler))
        .route("/api/stats/{slug}", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_stats_list_empty() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    let response = server.get("/api/stats").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 0);
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_stats_list_reports_every_slug() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "first", "https://one.com").await;
    common::create_test_link(&store, "second", "https://two.com").await;
    let server = server(state);

    server.get("/first").await;
    server.get("/first").await;

    let response = server.get("/api/stats").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["total"], 2);

    let items = json["items"].as_array().unwrap();
    let first = items.iter().find(|i| i["slug"] == "first").unwrap();
    let second = items.iter().find(|i| i["slug"] == "second").unwrap();

    assert_eq!(first["click_count"], 2);
    assert_eq!(first["original_url"], "https://one.com");
    assert_eq!(first["short_url"], "http://localhost:8080/first");
    assert_eq!(second["click_count"], 0);
}

#[tokio::test]
async fn test_stats_single_slug() {
    let (state, store) = common::create_test_state();
    common::create_test_link(&store, "abc123", "https://example.com").await;
    let server = server(state);

    server.get("/abc123").await;

    let response = server.get("/api/stats/abc123").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"], "abc123");
    assert_eq!(json["click_count"], 1);
    assert_eq!(json["created_at"], 1_700_000_000);
}

#[tokio::test]
async fn test_stats_unknown_slug() {
    let (state, _store) = common::create_test_state();
    let server = server(state);

    server.get("/api/stats/nope").await.assert_status_not_found();
}
