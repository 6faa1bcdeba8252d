//! Integration tests for the locations HTTP API.
//!
//! These tests talk to a real server over TCP and check status codes and
//! response envelopes.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use pinmap_integration_tests::TestServer;

async fn body(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    (status, response.json().await.unwrap())
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_sydney_create_get_delete() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    let (status, created) = body(
        client
            .post(server.url("/api/locations"))
            .json(&json!({"latitude": -33.8688, "longitude": 151.2093, "address": "Sydney"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Location saved successfully");
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, fetched) = body(
        client
            .get(server.url(&format!("/api/locations/{id}")))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["address"], "Sydney");
    assert_eq!(fetched["data"]["latitude"], -33.8688);
    assert_eq!(fetched["data"]["longitude"], 151.2093);

    let (status, deleted) = body(
        client
            .delete(server.url(&format!("/api/locations/{id}")))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Location deleted successfully");

    let (status, missing) = body(
        client
            .get(server.url(&format!("/api/locations/{id}")))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing, json!({"success": false, "error": "Location not found"}));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    for address in ["A", "B", "C"] {
        client
            .post(server.url("/api/locations"))
            .json(&json!({"latitude": 0, "longitude": 0, "address": address}))
            .send()
            .await
            .unwrap();
    }

    let (status, list) = body(
        client
            .get(server.url("/api/locations"))
            .send()
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 3);
    let addresses: Vec<_> = list["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["address"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(addresses, vec!["C", "B", "A"]);
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_validation_writes_nothing() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    let (status, rejected) = body(
        client
            .post(server.url("/api/locations"))
            .json(&json!({"latitude": "north", "longitude": 181, "address": "   "}))
            .send()
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(rejected["error"], "Validation failed");
    assert_eq!(
        rejected["errors"],
        json!([
            "Invalid latitude (must be between -90 and 90)",
            "Invalid longitude (must be between -180 and 180)",
            "Address is required and must be a non-empty string",
        ])
    );

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM locations")
        .fetch_one(&server.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_invalid_id_and_unknown_route() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    let (status, json) = body(
        client
            .delete(server.url("/api/locations/not-a-number"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Invalid location ID");

    let (status, json) = body(client.get(server.url("/nowhere")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Route not found");
}

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    let (status, json) = body(
        client
            .get(server.url("/api/locations/health"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Locations API is running");

    let response = client.get(server.url("/health/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_trailing_slash_matches_collection() {
    let server = TestServer::spawn().await.unwrap();
    let client = Client::new();

    let (status, _) = body(
        client
            .post(server.url("/api/locations/"))
            .json(&json!({"latitude": 10, "longitude": 20, "address": "Slash"}))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = body(
        client
            .get(server.url("/api/locations/"))
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["count"], 1);
}
