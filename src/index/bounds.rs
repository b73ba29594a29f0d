use crate::index::constants::GRID_SIZE;
use geo_types::{Polygon, Rect, coord};
use serde::{Deserialize, Serialize};

const DIVISIONS: f64 = GRID_SIZE as f64;
const LAST_INDEX: i64 = GRID_SIZE as i64 - 1;

/// A latitude/longitude rectangle in degrees.
///
/// The root domain is [`ROOT_BOUNDS`](crate::index::constants::ROOT_BOUNDS);
/// every level of a code narrows it to one of its 4x4 children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Height of one child row in degrees.
    pub fn lat_step(&self) -> f64 {
        (self.max_lat - self.min_lat) / DIVISIONS
    }

    /// Width of one child column in degrees.
    pub fn lon_step(&self) -> f64 {
        (self.max_lon - self.min_lon) / DIVISIONS
    }

    /// Closed-interval containment. NaN is never contained.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }

    /// Midpoint as `(lat, lon)`, unrounded.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Locates the child holding `(lat, lon)` and returns its grid position
    /// together with the narrowed box used for the next encode level.
    ///
    /// Rows count from the north, so the raw south-to-north index is
    /// inverted before clamping. Points on `max_lat`/`max_lon` clamp into the
    /// last row/column.
    pub fn encode_child(&self, lat: f64, lon: f64) -> (usize, usize, BoundingBox) {
        let lat_step = self.lat_step();
        let lon_step = self.lon_step();

        let raw_row = ((lat - self.min_lat) / lat_step).floor() as i64;
        let raw_col = ((lon - self.min_lon) / lon_step).floor() as i64;
        let row = (LAST_INDEX - raw_row).clamp(0, LAST_INDEX);
        let col = raw_col.clamp(0, LAST_INDEX);

        let max_lat = self.min_lat + lat_step * (DIVISIONS - row as f64);
        let min_lat = self.min_lat + lat_step * (LAST_INDEX - row) as f64;
        let min_lon = self.min_lon + lon_step * col as f64;
        // Derived from the narrowed min_lon, not the parent's. Changing this
        // shifts the floating point cell edges and breaks code compatibility.
        let max_lon = min_lon + lon_step;

        (
            row as usize,
            col as usize,
            BoundingBox {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
            },
        )
    }

    /// The child at `(row, col)` as computed when decoding.
    pub fn decode_child(&self, row: usize, col: usize) -> BoundingBox {
        let lat_step = self.lat_step();
        let lon_step = self.lon_step();

        BoundingBox {
            min_lat: self.max_lat - lat_step * (row + 1) as f64,
            max_lat: self.max_lat - lat_step * row as f64,
            min_lon: self.min_lon + lon_step * col as f64,
            max_lon: self.min_lon + lon_step * (col + 1) as f64,
        }
    }

    /// Converts to a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }

    pub fn to_polygon(&self) -> Polygon<f64> {
        self.to_rect().to_polygon()
    }
}
