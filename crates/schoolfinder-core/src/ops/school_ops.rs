//! Add and list operations
//!
//! Both follow validate → store call → assemble result. Nothing reaches the
//! store until validation has passed.

use crate::errors::{Result, SchoolError};
use crate::geo::rank_by_distance;
use crate::model::RankedSchool;
use crate::ops::store::SchoolStore;
use crate::rules::fields::{FieldMap, Location};
use crate::rules::validation::{validate_coordinate, validate_new_school};

/// Validate `fields` and store a new school, returning its id
///
/// # Errors
///
/// `Validation` if any field fails, `Storage` if the insert fails.
pub async fn add_school<S>(store: &S, fields: &FieldMap) -> Result<i64>
where
    S: SchoolStore + ?Sized,
{
    let school = validate_new_school(fields, Location::Body)?;
    let id = store.insert(school).await?;
    Ok(id)
}

/// List every school ordered by distance from the point in `fields`
///
/// # Errors
///
/// `Validation` for a bad query point, `NoSchools` when the store is empty,
/// `Storage` if the read fails.
pub async fn list_schools<S>(store: &S, fields: &FieldMap) -> Result<Vec<RankedSchool>>
where
    S: SchoolStore + ?Sized,
{
    let origin = validate_coordinate(fields, Location::Query)?;
    let schools = store.list_all().await?;
    if schools.is_empty() {
        return Err(SchoolError::NoSchools);
    }
    Ok(rank_by_distance(origin, schools))
}
