use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coordinate::Coordinate;
use crate::rules::fields::{FieldMap, Location};
use crate::rules::validation::{validate_new_school, ValidationErrors};

/// A stored school record
///
/// Records are immutable once written; `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A validated school that has not been stored yet
///
/// Constructed by [`validate_new_school`] or
/// [`NewSchool::try_new`]; fields are private so an unvalidated value can't
/// reach the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSchool {
    name: String,
    address: String,
    location: Coordinate,
}

impl NewSchool {
    pub(crate) fn from_parts(name: String, address: String, location: Coordinate) -> Self {
        Self {
            name,
            address,
            location,
        }
    }

    /// Validate raw values and build a `NewSchool`
    ///
    /// # Errors
    ///
    /// Returns every failing field, in the same shape the HTTP layer reports.
    pub fn try_new(
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationErrors> {
        let fields = FieldMap::from_pairs(
            [
                ("name", Value::from(name)),
                ("address", Value::from(address)),
                ("latitude", Value::from(latitude)),
                ("longitude", Value::from(longitude)),
            ],
            Location::Body,
        );
        validate_new_school(&fields, Location::Body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Attach the store-assigned id
    pub fn into_school(self, id: i64) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            latitude: self.location.latitude(),
            longitude: self.location.longitude(),
        }
    }
}

/// A school annotated with its distance from a query point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSchool {
    #[serde(flatten)]
    pub school: School,
    /// Great-circle distance in kilometres
    pub distance: f64,
}
