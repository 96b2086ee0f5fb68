pub mod school_ops;
pub mod store;

pub use store::{MemorySchoolStore, SchoolStore};
