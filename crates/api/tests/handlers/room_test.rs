use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_list_rooms() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/rooms").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["meta"], json!({ "http_status": 200, "length": 3 }));
    assert_eq!(body["data"][0], json!({ "room_id": "R1", "name": "Room R1", "location": "HQ" }));
    assert_eq!(body["data"][2]["room_id"], "R3");
}

#[tokio::test]
async fn test_health_reports_room_count() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok", "rooms": 3 }));
}
