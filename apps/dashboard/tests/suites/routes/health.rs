use actix_web::http::header::HeaderName;
use actix_web::test;
use dashboard::AppState;
use serde_json::Value;

use crate::support::app_builder::{create_test_app, test_security};
use crate::support::db::memory_db;
use crate::support::fake_store::FakeStore;

#[actix_web::test]
async fn test_health_reports_db_and_migrations() {
    let state = AppState::new(memory_db().await, test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp
        .headers()
        .get(HeaderName::from_static("x-request-id"))
        .is_some());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["migrations"], "m20251018_000001_profiles");
    assert!(body["time"].as_str().is_some());
}

#[actix_web::test]
async fn test_health_without_database() {
    let state = AppState::with_store(FakeStore::new(), test_security());
    let app = create_test_app(state).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "none");
}
