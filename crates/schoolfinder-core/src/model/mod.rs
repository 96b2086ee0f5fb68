pub mod coordinate;
pub mod school;

pub use coordinate::Coordinate;
pub use school::{NewSchool, RankedSchool, School};
