use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Valid latitude range in degrees
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitude range in degrees
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A point on the globe in decimal degrees
///
/// Values are always finite and inside [`LATITUDE_RANGE`] / [`LONGITUDE_RANGE`];
/// the only way to build one is through [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, returning `None` when either component is out of range
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if is_valid_latitude(latitude) && is_valid_longitude(longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

pub fn is_valid_latitude(value: f64) -> bool {
    value.is_finite() && LATITUDE_RANGE.contains(&value)
}

pub fn is_valid_longitude(value: f64) -> bool {
    value.is_finite() && LONGITUDE_RANGE.contains(&value)
}
