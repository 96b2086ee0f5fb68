use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::{ExError, ExErrorKind};
use crate::model::{NewSchool, School};

/// Persistence boundary for school records
///
/// Implementations must tolerate concurrent calls from independent requests.
/// Each method is a single atomic read or write; no ordering across callers
/// is promised.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    /// Append one record and return its store-assigned id
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the write cannot be committed.
    async fn insert(&self, school: NewSchool) -> Result<i64, ExError>;

    /// Every stored record, in id order
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the read fails.
    async fn list_all(&self) -> Result<Vec<School>, ExError>;
}

/// In-memory store
///
/// Ids start at 1 and increase monotonically, matching the SQLite store.
#[derive(Debug, Default)]
pub struct MemorySchoolStore {
    schools: Mutex<Vec<School>>,
}

impl MemorySchoolStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(op: &str) -> ExError {
        ExError::new(ExErrorKind::Internal)
            .with_op(op.to_string())
            .with_message("school list lock poisoned")
    }
}

#[async_trait]
impl SchoolStore for MemorySchoolStore {
    async fn insert(&self, school: NewSchool) -> Result<i64, ExError> {
        let mut schools = self
            .schools
            .lock()
            .map_err(|_| Self::poisoned("insert_school"))?;
        let id = schools.last().map_or(1, |s| s.id + 1);
        schools.push(school.into_school(id));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<School>, ExError> {
        self.schools
            .lock()
            .map(|schools| schools.clone())
            .map_err(|_| Self::poisoned("list_schools"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_memory_store_assigns_increasing_ids() {
        let store = MemorySchoolStore::new();
        let a = store
            .insert(NewSchool::try_new("A", "1 St", 1.0, 1.0).unwrap())
            .await
            .unwrap();
        let b = store
            .insert(NewSchool::try_new("B", "2 St", 2.0, 2.0).unwrap())
            .await
            .unwrap();

        assert_eq!((a, b), (1, 2));

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].name, "B");
    }

    #[tokio::test]
    async fn test_arc_store_delegates() {
        let store: Arc<dyn SchoolStore> = Arc::new(MemorySchoolStore::new());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
