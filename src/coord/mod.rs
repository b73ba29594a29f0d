use crate::index::constants::COORDINATE_PRECISION;
use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trait for types that can provide x/y coordinates.
///
/// Implemented for `(f64, f64)` tuples, `geo_types::Point<f64>` and [`LatLng`].
/// Follows the GIS axis order: x is longitude, y is latitude, so a tuple is
/// read as `(lon, lat)`.
pub trait Coordinate {
    /// Returns the x-coordinate (longitude).
    fn x(&self) -> f64;
    /// Returns the y-coordinate (latitude).
    fn y(&self) -> f64;
}

impl Coordinate for (f64, f64) {
    fn x(&self) -> f64 {
        self.0
    }
    fn y(&self) -> f64 {
        self.1
    }
}

impl Coordinate for Point<f64> {
    fn x(&self) -> f64 {
        Point::x(*self)
    }
    fn y(&self) -> f64 {
        Point::y(*self)
    }
}

impl Coordinate for LatLng {
    fn x(&self) -> f64 {
        self.longitude
    }
    fn y(&self) -> f64 {
        self.latitude
    }
}

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Copy with both values rounded to six decimal places.
    pub fn rounded(&self) -> Self {
        Self::new(
            round_to_precision(self.latitude),
            round_to_precision(self.longitude),
        )
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<Point<f64>> for LatLng {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Rounds to the nearest 1e-6, halves away from zero.
pub fn round_to_precision(value: f64) -> f64 {
    (value * COORDINATE_PRECISION).round() / COORDINATE_PRECISION
}
