//! schoolfinder core - domain model and rules for the school directory
//!
//! - School records and validated coordinates
//! - Haversine distance and proximity ranking
//! - Field validation for loosely-typed request input
//! - The `SchoolStore` persistence boundary and the add/list operations
//! - Error and logging facilities shared by the store and API crates

pub mod errors;
pub mod geo;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;

pub use schoolfinder_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SchoolError};
pub use geo::{distance_km, rank_by_distance};
pub use model::{Coordinate, NewSchool, RankedSchool, School};
pub use ops::{MemorySchoolStore, SchoolStore};
