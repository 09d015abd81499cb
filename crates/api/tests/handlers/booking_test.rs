use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use roombook_core::{
    calendar::{Date, Slot},
    errors::TimeError,
    mock::MockBookingRepo,
    models::room::Room,
    service::BookingManager,
};
use roombook_db::MemoryRepository;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, actor, actor_header, today};

async fn create(ctx: &TestContext, who: &'static str, body: Value) -> axum_test::TestResponse {
    ctx.server
        .post("/bookings")
        .add_header(actor_header(), actor(who))
        .json(&body)
        .await
}

fn body(room_id: &str, start: i32, end: i32) -> Value {
    json!({ "room_id": room_id, "date": today(), "start": start, "end": end })
}

fn expected_id(room_id: &str, start: i32) -> String {
    let date = Date::parse(&today()).unwrap();
    roombook_core::calendar::booking_id(room_id, date, Slot::new(start).unwrap()).unwrap()
}

#[tokio::test]
async fn test_create_booking_returns_derived_id() {
    let ctx = TestContext::new();

    let response = create(&ctx, "alice", body("R1", 4, 7)).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["booking_id"], expected_id("R1", 4));
    assert!(body["data"]["booking_id"].as_str().unwrap().ends_with("-0100"));
    assert_eq!(body["meta"]["http_status"], 200);
    assert_eq!(ctx.repository.row_count().await, 4);
}

#[tokio::test]
async fn test_create_booking_validation() {
    let ctx = TestContext::new();

    let cases = [
        json!({ "room_id": "", "date": today(), "start": 4, "end": 7 }),
        json!({ "room_id": "R1", "date": today(), "start": 7, "end": 4 }),
        json!({ "room_id": "R1", "date": "010100", "start": 4, "end": 7 }),
        json!({ "room_id": "R1", "start": 4, "end": 7 }),
        json!({ "room_id": "R1", "date": today(), "start": 4, "end": 96 }),
        json!({ "room_id": "R1", "date": "1st of May", "start": 4, "end": 7 }),
        json!({ "room_id": "R1", "date": today() }),
    ];

    for body in cases {
        let response = create(&ctx, "alice", body.clone()).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "body: {body}");
    }
    assert_eq!(ctx.repository.row_count().await, 0);
}

#[tokio::test]
async fn test_create_booking_requires_actor() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/bookings")
        .json(&json!({ "room_id": "R1", "date": today(), "start": 4, "end": 7 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.repository.row_count().await, 0);
}

#[tokio::test]
async fn test_create_booking_unknown_room() {
    let ctx = TestContext::new();

    let response = create(&ctx, "alice", body("R9", 4, 7)).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_booking_same_start_conflicts() {
    let ctx = TestContext::new();

    let first = create(&ctx, "alice", body("R1", 4, 5)).await;
    assert_eq!(first.status_code(), StatusCode::OK);

    let second = create(&ctx, "bob", body("R1", 4, 9)).await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
    assert_eq!(ctx.repository.row_count().await, 2);
}

#[tokio::test]
async fn test_list_bookings_for_day() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R2", 4, 7)).await;

    let response = ctx.server.get("/bookings").add_query_param("date", today()).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["meta"]["length"], 3);

    let data = body["data"].as_array().unwrap();
    let rooms: Vec<&str> = data.iter().map(|r| r["room_id"].as_str().unwrap()).collect();
    assert_eq!(rooms, vec!["R1", "R2", "R3"]);
    assert_eq!(data[0]["bookings"], json!([]));
    assert_eq!(
        data[1]["bookings"],
        json!([{
            "booking_id": expected_id("R2", 4),
            "date": today(),
            "start": 4,
            "end": 7,
            "reserved_by": "alice",
        }])
    );
    assert_eq!(data[2]["bookings"], json!([]));
}

#[tokio::test]
async fn test_list_bookings_defaults_to_today() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R1", 0, 95)).await;

    let response = ctx.server.get("/bookings").await;

    let body: Value = response.json();
    assert_eq!(body["data"][0]["bookings"][0]["end"], 95);
}

#[tokio::test]
async fn test_list_bookings_single_room() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R1", 4, 7)).await;

    let response = ctx.server.get("/bookings").add_query_param("room_id", "R3").await;

    let body: Value = response.json();
    assert_eq!(body["meta"]["length"], 1);
    assert_eq!(body["data"][0]["room_id"], "R3");
    assert_eq!(body["data"][0]["bookings"], json!([]));

    let missing = ctx.server.get("/bookings").add_query_param("room_id", "R9").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_self_bookings_only_show_own() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R1", 4, 7)).await;
    create(&ctx, "bob", body("R3", 8, 9)).await;

    let response = ctx
        .server
        .get("/self/bookings")
        .add_header(actor_header(), actor("bob"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let counts: Vec<usize> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["bookings"].as_array().unwrap().len())
        .collect();
    assert_eq!(counts, vec![0, 0, 1]);
    assert_eq!(body["data"][2]["bookings"][0]["reserved_by"], "bob");
}

#[tokio::test]
async fn test_delete_booking_by_owner() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R1", 4, 7)).await;
    let id = expected_id("R1", 4);

    let response = ctx
        .server
        .delete(&format!("/bookings/{id}"))
        .add_header(actor_header(), actor("alice"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Delete Booking successful");
    assert_eq!(body["data"], Value::Null);
    assert_eq!(ctx.repository.row_count().await, 0);
}

#[tokio::test]
async fn test_delete_booking_by_other_actor_is_refused() {
    let ctx = TestContext::new();
    create(&ctx, "alice", body("R1", 4, 7)).await;
    let id = expected_id("R1", 4);

    let response = ctx
        .server
        .delete(&format!("/bookings/{id}"))
        .add_header(actor_header(), actor("mallory"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(ctx.repository.row_count().await, 4);
}

#[tokio::test]
async fn test_delete_missing_or_malformed_booking() {
    let ctx = TestContext::new();

    let missing = ctx
        .server
        .delete(&format!("/bookings/{}", expected_id("R1", 4)))
        .add_header(actor_header(), actor("alice"))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let malformed = ctx
        .server
        .delete("/bookings/whatever")
        .add_header(actor_header(), actor("alice"))
        .await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let mut repo = MockBookingRepo::new();
    repo.expect_list_rooms()
        .returning(|| Err(TimeError::Storage(eyre::eyre!("connection refused"))));
    let service = Arc::new(BookingManager::new(Arc::new(repo)));
    let repository = Arc::new(MemoryRepository::new(Vec::<Room>::new()));
    let ctx = TestContext::with_service(service, repository);

    let rooms = ctx.server.get("/rooms").await;
    assert_eq!(rooms.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

    let health = ctx.server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}
