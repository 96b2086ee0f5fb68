mod common;

use axum::http::{HeaderValue, StatusCode};
use common::{failing_app, get, memory_app, post_json, send};
use schoolfinder_api::handlers::{OP_ADD_SCHOOL, OP_LIST_SCHOOLS};
use schoolfinder_core::logging_facility::test_capture::init_test_capture;
use schoolfinder_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_RESULT_COUNT, FIELD_SCHOOL_ID,
};
use schoolfinder_core_types::REQUEST_ID_HEADER;
use serde_json::json;
use tracing::Level;

fn add_request(request_id: &'static str) -> axum::http::Request<axum::body::Body> {
    let mut request = post_json(
        "/addSchool",
        json!({ "name": "Alpha", "address": "1 Main St", "latitude": 1, "longitude": 2 }),
    );
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, HeaderValue::from_static(request_id));
    request
}

#[tokio::test]
async fn test_add_school_logs_start_and_end() {
    let capture = init_test_capture();
    let (app, _store) = memory_app();
    let request_id = "log-add-ok-1";

    let res = send(&app, add_request(request_id)).await;
    assert_eq!(res.status, StatusCode::CREATED);

    let events = capture.for_request(request_id);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].op.as_deref(), Some(OP_ADD_SCHOOL));
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));
    assert_eq!(events[1].op.as_deref(), Some(OP_ADD_SCHOOL));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field(FIELD_SCHOOL_ID), Some("1"));
    assert!(events[1].field(FIELD_DURATION_MS).is_some());
}

#[tokio::test]
async fn test_add_school_storage_failure_logs_single_error() {
    let capture = init_test_capture();
    let (app, _store) = failing_app();
    let request_id = "log-add-fail-2";

    let res = send(&app, add_request(request_id)).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);

    let events = capture.for_request(request_id);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event.as_deref(), Some(EVENT_START));

    let end = &events[1];
    assert_eq!(end.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(end.level, Level::ERROR);
    assert_eq!(end.field(FIELD_ERR_CODE), Some("ERR_PERSISTENCE"));
    assert!(end.field("error").unwrap_or_default().contains("SQLITE_FULL"));

    let errors = events.iter().filter(|e| e.level == Level::ERROR).count();
    assert_eq!(errors, 1);
}

#[tokio::test]
async fn test_rejected_request_ends_without_error_event() {
    let capture = init_test_capture();
    let (app, _store) = memory_app();
    let request_id = "log-add-invalid-3";

    let mut request = post_json("/addSchool", json!({ "name": "Alpha" }));
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, HeaderValue::from_static(request_id));
    let res = send(&app, request).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let events = capture.for_request(request_id);
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].level, Level::INFO);
    assert_eq!(events[1].field("status"), Some("400"));
}

#[tokio::test]
async fn test_list_schools_logs_result_count() {
    let capture = init_test_capture();
    let (app, _store) = memory_app();
    send(&app, add_request("log-list-seed-4")).await;

    let mut request = get("/listSchools?latitude=1&longitude=2");
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, HeaderValue::from_static("log-list-5"));
    let res = send(&app, request).await;
    assert_eq!(res.status, StatusCode::OK);

    let events = capture.for_request("log-list-5");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].op.as_deref(), Some(OP_LIST_SCHOOLS));
    assert_eq!(events[1].event.as_deref(), Some(EVENT_END));
    assert_eq!(events[1].field(FIELD_RESULT_COUNT), Some("1"));
}
