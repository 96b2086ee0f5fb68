//! SQLite-backed school store

use async_trait::async_trait;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, task_failed, Result};
use crate::migrations::apply_migrations;
use schoolfinder_core::errors::ExError;
use schoolfinder_core::model::{NewSchool, School};
use schoolfinder_core::SchoolStore;

/// SQLite repository for school records
///
/// One connection is shared behind a mutex. Every call runs a single
/// statement on tokio's blocking pool, so concurrent requests queue on the
/// lock instead of stalling the async runtime.
#[derive(Clone)]
pub struct SqliteSchoolStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSchoolStore {
    /// Open (creating if needed) the database at `path` and bring the schema
    /// up to date
    ///
    /// # Errors
    ///
    /// Fails if the file can't be opened, configured, or migrated. The
    /// service must not start serving in that case.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_backed = path.as_os_str() != db::IN_MEMORY;

        let mut conn = db::open(path)?;
        db::configure(&conn, file_backed)?;
        apply_migrations(&mut conn)?;

        tracing::info!(op = "open_store", path = %path.display(), "school store ready");
        Ok(Self::from_connection(conn))
    }

    /// Fresh, migrated in-memory store
    ///
    /// # Errors
    ///
    /// Fails only if migrations fail.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn, false)?;
        apply_migrations(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Number of stored records
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the read fails.
    pub async fn count(&self) -> Result<i64> {
        self.run("count_schools", |conn| {
            conn.query_row("SELECT COUNT(*) FROM schools", [], |row| row.get(0))
                .map_err(|e| from_rusqlite("count_schools", e))
        })
        .await
    }

    async fn run<T, F>(&self, op: &'static str, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn.lock().map_err(|_| lock_poisoned(op))?;
            f(&*guard)
        })
        .await
        .map_err(|e| task_failed(op, e))?
    }
}

#[async_trait]
impl SchoolStore for SqliteSchoolStore {
    async fn insert(&self, school: NewSchool) -> std::result::Result<i64, ExError> {
        let id = self
            .run("insert_school", move |conn| {
                let mut stmt = conn
                    .prepare_cached(
                        "INSERT INTO schools (name, address, latitude, longitude)
                         VALUES (?1, ?2, ?3, ?4)
                         RETURNING id",
                    )
                    .map_err(|e| from_rusqlite("insert_school", e))?;

                let location = school.location();
                let id = stmt
                    .query_row(
                        rusqlite::params![
                            school.name(),
                            school.address(),
                            location.latitude(),
                            location.longitude(),
                        ],
                        |row| row.get::<_, i64>(0),
                    )
                    .map_err(|e| from_rusqlite("insert_school", e))?;
                Ok(id)
            })
            .await?;

        tracing::debug!(op = "insert_school", school_id = id);
        Ok(id)
    }

    async fn list_all(&self) -> std::result::Result<Vec<School>, ExError> {
        self.run("list_schools", |conn| {
            let mut stmt = conn
                .prepare_cached(
                    "SELECT id, name, address, latitude, longitude FROM schools ORDER BY id",
                )
                .map_err(|e| from_rusqlite("list_schools", e))?;

            let schools = stmt
                .query_map([], |row| {
                    Ok(School {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        address: row.get(2)?,
                        latitude: row.get(3)?,
                        longitude: row.get(4)?,
                    })
                })
                .map_err(|e| from_rusqlite("list_schools", e))?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| from_rusqlite("list_schools", e))?;

            Ok(schools)
        })
        .await
    }
}
