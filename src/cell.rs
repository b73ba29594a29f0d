use crate::coord::{Coordinate, LatLng};
use crate::error::DigipinError;
use crate::geom::representative_points;
use crate::index::{BoundingBox, Digipin, decode_bounds, decode_pin, encode};
use geo::Intersects;
use geo_types::{Coord, Geometry, Polygon};
use geojson::{Feature, JsonObject, JsonValue};
use rayon::prelude::*;

/// A single level-10 DIGIPIN cell.
///
/// Each `DigipinCell` holds its code, the rounded center the code decodes
/// to, and the rectangle it covers.
///
/// # Example
///
/// ```
/// use digipin_rs::DigipinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// // (lon, lat) tuple, GIS axis order
/// let cell = DigipinCell::from_wgs84(&(77.2090, 28.6139))?;
/// println!("DIGIPIN: {}", cell.pin);
/// println!("Center: ({}, {})", cell.latitude(), cell.longitude());
///
/// let polygon = cell.to_polygon();
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DigipinCell {
    /// The code of this cell
    pub pin: Digipin,
    /// Decoded center, rounded to six decimal places
    pub center: LatLng,
    /// Extent of the cell in degrees
    pub bounds: BoundingBox,
}

impl DigipinCell {
    /// Create a cell from an already validated code.
    pub fn from_pin(pin: Digipin) -> Self {
        Self {
            pin,
            center: decode_pin(&pin),
            bounds: decode_bounds(&pin),
        }
    }

    /// Create a cell from a code, with or without separators.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::DigipinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigipinError> {
    /// let cell = DigipinCell::from_lat_lon(28.6139, 77.2090)?;
    /// let restored = DigipinCell::from_code(&cell.pin.to_string())?;
    /// assert_eq!(cell, restored);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigipinError> {
        Ok(Self::from_pin(Digipin::parse(code)?))
    }

    pub fn from_lat_lon(lat: f64, lon: f64) -> Result<Self, DigipinError> {
        Ok(Self::from_pin(encode(lat, lon)?))
    }

    /// Create a cell from WGS84 coordinates, x = longitude, y = latitude.
    pub fn from_wgs84(coord: &impl Coordinate) -> Result<Self, DigipinError> {
        Self::from_lat_lon(coord.y(), coord.x())
    }

    /// Encode many coordinates in parallel. Fails on the first out-of-range input.
    pub fn from_wgs84_batch<C>(coords: &[C]) -> Result<Vec<Self>, DigipinError>
    where
        C: Coordinate + Sync,
    {
        coords.par_iter().map(Self::from_wgs84).collect()
    }

    /// Cells for a geometry: one per point of a (multi)point, otherwise the
    /// cell holding the centroid. Empty geometries are an error.
    pub fn from_geometry(geometry: &Geometry<f64>) -> Result<Vec<Self>, DigipinError> {
        let points = representative_points(geometry);
        if points.is_empty() {
            return Err(DigipinError::GeometryParseError(
                "geometry has no points".to_string(),
            ));
        }
        points.iter().map(Self::from_wgs84).collect()
    }

    pub fn latitude(&self) -> f64 {
        self.center.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.center.longitude
    }

    /// Whether the point lies in this cell, edges included.
    pub fn contains(&self, coord: &impl Coordinate) -> bool {
        let point = Coord {
            x: coord.x(),
            y: coord.y(),
        };
        self.bounds.to_rect().intersects(&point)
    }

    /// Cell outline as a closed rectangle polygon (x = longitude, y = latitude).
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounds.to_polygon()
    }

    /// GeoJSON feature of the cell outline carrying `digipin`, `latitude`
    /// and `longitude` properties.
    pub fn to_geojson_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert(
            "digipin".to_string(),
            JsonValue::from(self.pin.to_string()),
        );
        properties.insert("latitude".to_string(), JsonValue::from(self.latitude()));
        properties.insert("longitude".to_string(), JsonValue::from(self.longitude()));

        Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::from(&self.to_polygon())),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
