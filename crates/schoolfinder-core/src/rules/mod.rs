pub mod fields;
pub mod validation;

pub use fields::{FieldMap, Location};
pub use validation::{validate_coordinate, validate_new_school, FieldError, ValidationErrors};
