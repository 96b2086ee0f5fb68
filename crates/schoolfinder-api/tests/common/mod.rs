use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use schoolfinder_api::{router, AppState};
use schoolfinder_core::errors::{ExError, ExErrorKind};
use schoolfinder_core::model::{NewSchool, School};
use schoolfinder_core::{MemorySchoolStore, SchoolStore};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Router backed by a fresh in-memory store
#[allow(dead_code)]
pub fn memory_app() -> (Router, Arc<MemorySchoolStore>) {
    let store = Arc::new(MemorySchoolStore::new());
    (router(AppState::new(store.clone())), store)
}

/// Router backed by a store whose every call fails
#[allow(dead_code)]
pub fn failing_app() -> (Router, Arc<FailingStore>) {
    let store = Arc::new(FailingStore::default());
    (router(AppState::new(store.clone())), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn post_raw(uri: &str, content_type: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Store double whose every call fails, counting attempts
#[derive(Default)]
pub struct FailingStore {
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchoolStore for FailingStore {
    async fn insert(&self, _school: NewSchool) -> Result<i64, ExError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExError::new(ExErrorKind::Persistence)
            .with_op("insert_school")
            .with_message("SQLITE_FULL: database or disk is full"))
    }

    async fn list_all(&self) -> Result<Vec<School>, ExError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExError::new(ExErrorKind::Persistence)
            .with_op("list_schools")
            .with_message("SQLITE_IOERR: disk I/O error"))
    }
}
