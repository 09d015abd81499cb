use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use roombook_api::middleware::error_handling::map_error;
use roombook_core::errors::TimeError;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::TestContext;

#[rstest]
#[case(TimeError::Format("bad date".into()), StatusCode::BAD_REQUEST)]
#[case(TimeError::Validation("end before start".into()), StatusCode::BAD_REQUEST)]
#[case(TimeError::NotFound("Booking x not found".into()), StatusCode::NOT_FOUND)]
#[case(TimeError::Ownership("not yours".into()), StatusCode::FORBIDDEN)]
#[case(TimeError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(TimeError::Storage(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: TimeError, #[case] status: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), status);
}

#[tokio::test]
async fn test_error_envelope() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/bookings").add_query_param("date", "2024-01-01").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["meta"]["http_status"], 400);
    assert_eq!(body["errors"][0]["code"], 400);
    assert!(body["errors"][0]["message"].as_str().unwrap().starts_with("Format error"));
}

#[tokio::test]
async fn test_responses_disable_caching() {
    let ctx = TestContext::new();

    for response in [ctx.server.get("/rooms").await, ctx.server.get("/self/bookings").await] {
        assert_eq!(response.header("cache-control"), "no-cache, no-store, must-revalidate");
        assert_eq!(response.header("pragma"), "no-cache");
        assert_eq!(response.header("expires"), "0");
    }
}

#[test_log::test(tokio::test)]
async fn test_missing_actor_header() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/self/bookings").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["errors"][0]["message"].as_str().unwrap().contains("x-actor"));
}
