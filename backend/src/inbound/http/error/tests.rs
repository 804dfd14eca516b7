//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn store_failure() -> Error {
    Error::store_failure("failed to index user in cache")
        .with_trace_id(TRACE_ID)
        .with_details(json!({
            "store": "cache",
            "completed": ["relational", "document"],
            "cause": "user cache backend failure: connection refused",
        }))
}

#[rstest]
#[case(Error::bad_request("invalid email format"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("user not found"), StatusCode::NOT_FOUND)]
#[case(Error::store_failure("failed to create user"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), expected);
}

#[rstest]
#[actix_web::test]
async fn store_failures_keep_message_and_details(store_failure: Error) {
    let response = ResponseError::error_response(&store_failure);
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header is set")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("error JSON");
    assert_eq!(body["code"], "store_failure");
    assert_eq!(body["message"], "failed to index user in cache");
    assert_eq!(body["traceId"], TRACE_ID);
    assert_eq!(body["details"]["completed"], json!(["relational", "document"]));
}

#[rstest]
#[actix_web::test]
async fn omits_trace_header_without_trace_id() {
    let response = ResponseError::error_response(&Error::bad_request("invalid user id"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body: Error = serde_json::from_slice(&bytes).expect("error JSON");
    assert_eq!(body.code(), ErrorCode::BadRequest);
    assert_eq!(body.message(), "invalid user id");
}
