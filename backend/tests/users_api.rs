//! End-to-end tests for the users API over in-memory stores.
//!
//! The full application stack is assembled (trace middleware, user routes,
//! health probes) with the four driven ports replaced by the doubles from
//! `userhub::test_support`.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use userhub::Trace;
use userhub::domain::ports::{CacheError, DocumentStoreError, PublishError, USER_CREATED_QUEUE};
use userhub::domain::{User, UserId};
use userhub::inbound::http::health::{HealthState, live, ready};
use userhub::inbound::http::state::HttpState;
use userhub::inbound::http::users;
use userhub::middleware::trace::TRACE_ID_HEADER;
use userhub::test_support::InMemoryStores;

#[fixture]
fn stores() -> InMemoryStores {
    InMemoryStores::default()
}

async fn init_app(
    stores: &InMemoryStores,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    test::init_service(
        App::new()
            .app_data(health)
            .app_data(web::Data::new(HttpState::new(Arc::new(stores.service()))))
            .wrap(Trace)
            .configure(users::configure)
            .service(ready)
            .service(live),
    )
    .await
}

fn post_user(body: Value) -> Request {
    TestRequest::post()
        .uri("/users/")
        .set_json(body)
        .to_request()
}

async fn read_json(response: ServiceResponse<BoxBody>) -> Value {
    test::read_body_json(response).await
}

#[rstest]
#[actix_web::test]
async fn create_then_get_round_trips_through_every_store(stores: InMemoryStores) {
    let app = init_app(&stores).await;

    let response = test::call_service(
        &app,
        post_user(json!({"name": "Alice123", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({"user": {"id": 1, "name": "Alice123", "email": "alice@example.com"}})
    );

    let expected = User::new(UserId::new(1), "Alice123", "alice@example.com");
    assert_eq!(stores.users.users(), vec![expected.clone()]);
    assert_eq!(stores.documents.documents(), vec![expected]);
    assert_eq!(stores.cache.get("alice@example.com"), Some(UserId::new(1)));
    assert_eq!(
        stores.events.messages(),
        vec![(
            USER_CREATED_QUEUE.to_owned(),
            "alice@example.com".to_owned()
        )]
    );

    let request = TestRequest::get().uri("/users/1").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({"id": 1, "name": "Alice123", "email": "alice@example.com"})
    );
}

#[rstest]
#[case(json!({"name": "Bob", "email": "bob@example.com"}), "name")]
#[case(json!({"name": "Alice123", "email": "not-an-email"}), "email")]
#[actix_web::test]
async fn invalid_fields_are_rejected_before_any_write(
    stores: InMemoryStores,
    #[case] body: Value,
    #[case] field: &str,
) {
    let app = init_app(&stores).await;

    let response = test::call_service(&app, post_user(body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["code"], "bad_request");
    assert_eq!(body["details"]["field"], field);
    assert!(body["traceId"].is_string());

    assert!(stores.users.users().is_empty());
    assert!(stores.documents.documents().is_empty());
    assert!(stores.cache.is_empty());
    assert!(stores.events.messages().is_empty());
}

#[rstest]
#[case("{not json")]
#[case(r#"["Alice123","alice@example.com"]"#)]
#[case("null")]
#[case("42")]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(stores: InMemoryStores, #[case] body: &'static str) {
    let app = init_app(&stores).await;

    let request = TestRequest::post()
        .uri("/users/")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(stores.users.users().is_empty());
    assert!(stores.events.messages().is_empty());
}

#[rstest]
#[case(r#"["Bobby12","b@b.co"]"#)]
#[case("null")]
#[actix_web::test]
async fn update_with_non_object_body_is_a_bad_request(
    stores: InMemoryStores,
    #[case] body: &'static str,
) {
    let alice = User::new(UserId::new(1), "Alice123", "alice@example.com");
    stores.users.seed(alice.clone());
    let app = init_app(&stores).await;

    let request = TestRequest::put()
        .uri("/users/1")
        .insert_header(("content-type", "application/json"))
        .set_payload(body)
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(stores.users.users(), vec![alice]);
}

#[rstest]
#[actix_web::test]
async fn list_returns_users_in_id_order(stores: InMemoryStores) {
    let app = init_app(&stores).await;
    for (name, email) in [("Alice123", "a@b.co"), ("Bobby12", "b@b.co")] {
        let response =
            test::call_service(&app, post_user(json!({"name": name, "email": email}))).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response =
        test::call_service(&app, TestRequest::get().uri("/users").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "Alice123", "email": "a@b.co"},
            {"id": 2, "name": "Bobby12", "email": "b@b.co"}
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn empty_list_is_an_empty_array(stores: InMemoryStores) {
    let app = init_app(&stores).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/users/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await, json!([]));
}

#[rstest]
#[case("/users/99")]
#[case("/users/abc")]
#[actix_web::test]
async fn get_of_unknown_id_is_not_found(stores: InMemoryStores, #[case] uri: &str) {
    let app = init_app(&stores).await;

    let response = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn update_rewrites_relational_and_document_stores(stores: InMemoryStores) {
    stores
        .users
        .seed(User::new(UserId::new(1), "Alice123", "alice@example.com"));
    let app = init_app(&stores).await;

    let request = TestRequest::put()
        .uri("/users/1")
        .set_json(json!({"email": "alice@new.example.com"}))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body,
        json!({"user": {"id": 1, "name": "Alice123", "email": "alice@new.example.com"}})
    );

    let updated = User::new(UserId::new(1), "Alice123", "alice@new.example.com");
    assert_eq!(stores.users.users(), vec![updated]);
    assert!(stores.cache.is_empty());
    assert!(stores.events.messages().is_empty());
}

#[rstest]
#[actix_web::test]
async fn update_of_missing_user_is_not_found_even_with_a_bad_body(stores: InMemoryStores) {
    let app = init_app(&stores).await;

    let request = TestRequest::put()
        .uri("/users/5")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_clears_the_user_and_a_second_delete_is_not_found(stores: InMemoryStores) {
    let app = init_app(&stores).await;
    let response = test::call_service(
        &app,
        post_user(json!({"name": "Alice123", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let delete = || TestRequest::delete().uri("/users/1").to_request();
    let response = test::call_service(&app, delete()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(stores.users.users().is_empty());
    assert!(stores.documents.documents().is_empty());
    // Deletion removes the id key; the email key written on create stays.
    assert_eq!(stores.cache.get("alice@example.com"), Some(UserId::new(1)));

    let response = test::call_service(&app, delete()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_with_non_numeric_id_is_a_bad_request(stores: InMemoryStores) {
    let app = init_app(&stores).await;

    let request = TestRequest::delete().uri("/users/abc").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["message"], "invalid user id");
}

#[rstest]
#[actix_web::test]
async fn document_store_failure_reports_partial_propagation(stores: InMemoryStores) {
    stores
        .documents
        .fail_with(DocumentStoreError::connection("no primary"));
    let app = init_app(&stores).await;

    let response = test::call_service(
        &app,
        post_user(json!({"name": "Alice123", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["code"], "store_failure");
    assert_eq!(body["details"]["store"], "document");
    assert_eq!(body["details"]["completed"], json!(["relational"]));

    assert_eq!(stores.users.users().len(), 1);
    assert!(stores.cache.is_empty());
    assert!(stores.events.messages().is_empty());
}

#[rstest]
#[case::cache(true)]
#[case::queue(false)]
#[actix_web::test]
async fn later_store_failures_keep_earlier_writes(
    stores: InMemoryStores,
    #[case] fail_cache: bool,
) {
    if fail_cache {
        stores.cache.fail_with(CacheError::backend("timeout"));
    } else {
        stores.events.fail_with(PublishError::unavailable("closed"));
    }
    let app = init_app(&stores).await;

    let response = test::call_service(
        &app,
        post_user(json!({"name": "Alice123", "email": "alice@example.com"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(stores.users.users().len(), 1);
    assert_eq!(stores.documents.documents().len(), 1);
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_probes_answer_ok(stores: InMemoryStores, #[case] uri: &str) {
    let app = init_app(&stores).await;

    let response = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
}
