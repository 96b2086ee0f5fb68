use async_trait::async_trait;
use schoolfinder_core::errors::{ExError, ExErrorKind};
use schoolfinder_core::model::{NewSchool, School};
use schoolfinder_core::rules::{FieldMap, Location};
use schoolfinder_core::SchoolStore;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Build a body field map from a JSON object literal
#[allow(dead_code)]
pub fn body(value: Value) -> FieldMap {
    match value {
        Value::Object(map) => FieldMap::from_json_object(map, Location::Body),
        other => panic!("expected JSON object, got {other}"),
    }
}

/// Build a query field map the way a query string decodes
#[allow(dead_code)]
pub fn query(latitude: &str, longitude: &str) -> FieldMap {
    FieldMap::from_string_pairs(
        vec![
            ("latitude".to_string(), latitude.to_string()),
            ("longitude".to_string(), longitude.to_string()),
        ],
        Location::Query,
    )
}

/// Store double whose every call fails, counting attempts
#[derive(Default)]
pub struct FailingStore {
    pub calls: AtomicUsize,
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
            .with_message("database is locked"))
    }

    async fn list_all(&self) -> Result<Vec<School>, ExError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ExError::new(ExErrorKind::Persistence)
            .with_op("list_schools")
            .with_message("database is locked"))
    }
}
