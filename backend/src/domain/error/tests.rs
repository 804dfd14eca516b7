//! Tests for the error payload constructors and serialisation.

use super::*;
use crate::middleware::trace::TraceId;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn store_error() -> Error {
    Error::store_failure("failed to store user in document store")
        .with_details(json!({ "store": "document", "completed": ["relational"] }))
}

#[rstest]
#[case(Error::bad_request("bad"), ErrorCode::BadRequest)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::store_failure("boom"), ErrorCode::StoreFailure)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::BadRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::store_failure("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_snake_case_code_and_details(store_error: Error) {
    let value = serde_json::to_value(&store_error).expect("serialise error");
    assert_eq!(value["code"], "store_failure");
    assert_eq!(value["message"], "failed to store user in document store");
    assert_eq!(value["details"]["store"], "document");
    assert!(value.get("traceId").is_none());
}

#[rstest]
fn deserialises_own_payload(store_error: Error) {
    let payload = serde_json::to_string(&store_error.clone().with_trace_id(TRACE_ID))
        .expect("serialise error");
    let decoded: Error = serde_json::from_str(&payload).expect("deserialise error");
    assert_eq!(decoded.code(), ErrorCode::StoreFailure);
    assert_eq!(decoded.trace_id(), Some(TRACE_ID));
    assert_eq!(decoded.details(), store_error.details());
}

#[rstest]
fn display_uses_message() {
    assert_eq!(
        Error::bad_request("invalid user id").to_string(),
        "invalid user id"
    );
}
