#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

#[ctor::ctor]
fn init_logging() {
    test_support::logging::init();
}

/// Assert an RFC 7807 error response and return its JSON body.
///
/// Also checks that the body's `trace_id` matches both `x-trace-id` and
/// `x-request-id`.
pub async fn assert_problem_details(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(content_type, "application/problem+json");

    let trace_hdr = headers
        .get(HeaderName::from_static("x-trace-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header")
        .to_string();
    let request_hdr = headers
        .get(HeaderName::from_static("x-request-id"))
        .and_then(|v| v.to_str().ok())
        .expect("x-request-id header")
        .to_string();

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["status"].as_u64(), Some(expected_status as u64));
    assert_eq!(json["code"].as_str(), Some(expected_code));
    assert_eq!(json["trace_id"].as_str(), Some(trace_hdr.as_str()));
    assert_eq!(trace_hdr, request_hdr);
    assert!(json["type"]
        .as_str()
        .is_some_and(|t| t.ends_with(expected_code)));

    json
}
