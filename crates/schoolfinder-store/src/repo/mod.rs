//! Repository layer implementing the core `SchoolStore` boundary

pub mod sqlite_repo;

pub use sqlite_repo::SqliteSchoolStore;
