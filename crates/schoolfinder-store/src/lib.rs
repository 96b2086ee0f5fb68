//! schoolfinder store - SQLite persistence for school records
//!
//! Provides:
//! - Connection management and pragmas
//! - Embedded, checksummed schema migrations
//! - `SqliteSchoolStore`, the production `SchoolStore`

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use repo::SqliteSchoolStore;
