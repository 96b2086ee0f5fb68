//! Field validation for school input
//!
//! Every failing field is reported, not just the first, so a client can fix
//! a request in one round trip.

use serde::Serialize;
use serde_json::Value;

use super::fields::FieldMap;
pub use super::fields::Location;
use crate::model::coordinate::{is_valid_latitude, is_valid_longitude};
use crate::model::{Coordinate, NewSchool};

pub const MSG_NAME_REQUIRED: &str = "School name is required";
pub const MSG_ADDRESS_REQUIRED: &str = "School address is required";
pub const MSG_LATITUDE_INVALID: &str = "Valid latitude is required (-90 to 90)";
pub const MSG_LONGITUDE_INVALID: &str = "Valid longitude is required (-180 to 180)";

/// A single failing field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    msg: String,
    path: String,
    location: Location,
}

impl FieldError {
    pub fn new(
        path: impl Into<String>,
        msg: impl Into<String>,
        value: Option<Value>,
        location: Location,
    ) -> Self {
        Self {
            kind: "field",
            value,
            msg: msg.into(),
            path: path.into(),
            location,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

/// Non-empty list of failing fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Names of the failing fields, in report order
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(FieldError::path).collect()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} field(s) failed validation: {}",
            self.0.len(),
            self.fields().join(", ")
        )
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate input for a new school record
///
/// `missing_at` is the location reported for fields that are absent entirely.
///
/// # Errors
///
/// Returns all failing fields in the order name, address, latitude, longitude.
pub fn validate_new_school(
    fields: &FieldMap,
    missing_at: Location,
) -> Result<NewSchool, ValidationErrors> {
    let mut errors = Vec::new();

    let name = required_text(fields, "name", MSG_NAME_REQUIRED, missing_at, &mut errors);
    let address = required_text(
        fields,
        "address",
        MSG_ADDRESS_REQUIRED,
        missing_at,
        &mut errors,
    );
    let location = coordinate(fields, missing_at, &mut errors);

    match (name, address, location) {
        (Some(name), Some(address), Some(location)) if errors.is_empty() => {
            Ok(NewSchool::from_parts(name, address, location))
        }
        _ => Err(ValidationErrors(errors)),
    }
}

/// Validate a query point
///
/// # Errors
///
/// Returns the failing coordinate fields.
pub fn validate_coordinate(
    fields: &FieldMap,
    missing_at: Location,
) -> Result<Coordinate, ValidationErrors> {
    let mut errors = Vec::new();
    match coordinate(fields, missing_at, &mut errors) {
        Some(point) if errors.is_empty() => Ok(point),
        _ => Err(ValidationErrors(errors)),
    }
}

fn coordinate(
    fields: &FieldMap,
    missing_at: Location,
    errors: &mut Vec<FieldError>,
) -> Option<Coordinate> {
    let latitude = bounded_float(
        fields,
        "latitude",
        is_valid_latitude,
        MSG_LATITUDE_INVALID,
        missing_at,
        errors,
    );
    let longitude = bounded_float(
        fields,
        "longitude",
        is_valid_longitude,
        MSG_LONGITUDE_INVALID,
        missing_at,
        errors,
    );
    Coordinate::new(latitude?, longitude?)
}

fn required_text(
    fields: &FieldMap,
    name: &str,
    msg: &str,
    missing_at: Location,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match fields.get(name) {
        Some((Value::String(s), _)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some((value, location)) => {
            errors.push(FieldError::new(name, msg, Some(value.clone()), location));
            None
        }
        None => {
            errors.push(FieldError::new(name, msg, None, missing_at));
            None
        }
    }
}

fn bounded_float(
    fields: &FieldMap,
    name: &str,
    in_range: fn(f64) -> bool,
    msg: &str,
    missing_at: Location,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let Some((value, location)) = fields.get(name) else {
        errors.push(FieldError::new(name, msg, None, missing_at));
        return None;
    };

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if in_range(v) => Some(v),
        _ => {
            errors.push(FieldError::new(name, msg, Some(value.clone()), location));
            None
        }
    }
}
