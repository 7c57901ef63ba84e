use actix_web::http::header;
use actix_web::{test, HttpMessage};
use dashboard::extractors::AuthId;
use dashboard::AppState;
use serde_json::Value;
use test_support::{unique_auth_id, unique_email};

use crate::common::assert_problem_details;
use crate::support::app_builder::{bearer_for, create_test_app, test_security};
use crate::support::db::{memory_db, row_counts};
use crate::support::fake_store::{db_unavailable, FakeStore, Op};

#[actix_web::test]
async fn test_profile_requires_bearer_token() {
    let state = AppState::with_store(FakeStore::new(), test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(
        resp.headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
    assert_problem_details(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;
}

#[actix_web::test]
async fn test_profile_rejects_foreign_token() {
    let store = FakeStore::new();
    let state = AppState::with_store(store.clone(), test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, 401, "UNAUTHORIZED_INVALID_JWT").await;
    assert!(store.calls().is_empty());
}

#[actix_web::test]
async fn test_verified_caller_is_recorded_for_request_log() {
    let store = FakeStore::new();
    store.provision("logged-player", 5);
    let state = AppState::with_store(store, test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for("logged-player", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.request().extensions().get::<AuthId>(),
        Some(&AuthId("logged-player".to_string()))
    );

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert!(resp.request().extensions().get::<AuthId>().is_none());
}

#[actix_web::test]
async fn test_profile_provisions_on_first_request_sqlite() {
    let conn = memory_db().await;
    let state = AppState::new(conn.clone(), test_security());
    let app = create_test_app(state).await;
    let auth_id = unique_auth_id();
    let email = unique_email("player");

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for(&auth_id, Some(&email))))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(first["account"]["auth_id"], auth_id.as_str());
    assert_eq!(first["account"]["role"], "player");
    assert_eq!(first["game_stats"]["hp"], 100);
    assert_eq!(first["game_stats"]["max_mp"], 50);
    assert_eq!(first["wallet"]["coins"], 0);

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for(&auth_id, Some(&email))))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(second["account"]["id"], first["account"]["id"]);
    assert_eq!(second["wallet"]["id"], first["wallet"]["id"]);
    assert_eq!(row_counts(&conn).await, (1, 1, 1));
}

#[actix_web::test]
async fn test_profile_partial_result_has_null_field() {
    let store = FakeStore::new();
    store.fail(Op::CreateWallet, db_unavailable());
    let state = AppState::with_store(store, test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for("u1", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["account"]["email"], "");
    assert!(body["game_stats"].is_object());
    assert!(body["wallet"].is_null());
}

#[actix_web::test]
async fn test_profile_fatal_failure_is_problem_details() {
    let store = FakeStore::new();
    store.fail(Op::FindAccount, db_unavailable());
    let state = AppState::with_store(store, test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for("u1", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.headers().get(header::RETRY_AFTER).is_some());
    let body = assert_problem_details(resp, 503, "DB_UNAVAILABLE").await;
    assert_eq!(
        body["detail"],
        "Failed to load account: Database unavailable"
    );
}

#[actix_web::test]
async fn test_profile_other_fatal_failure_is_500() {
    let store = FakeStore::new();
    store.fail(
        Op::FindGameStats,
        dashboard::DomainError::validation("Foreign key constraint violation"),
    );
    let state = AppState::with_store(store, test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get()
        .uri("/api/profile")
        .insert_header((header::AUTHORIZATION, bearer_for("u1", None)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body = assert_problem_details(resp, 500, "PROFILE_LOAD_FAILED").await;
    assert_eq!(
        body["detail"],
        "Failed to load game stats: Foreign key constraint violation"
    );
}
