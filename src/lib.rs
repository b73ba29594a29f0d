//! # digipin-rs
//!
//! DIGIPIN splits the box lat `[2.5, 38.5]` x lon `[63.5, 99.5]` into a 4x4
//! grid ten times over. Each level contributes one symbol, giving a code
//! such as `39J-438-TJC7` for a cell roughly 4m across.
//!
//! ### 1. `encode` / `decode` - The Codec
//!
//! ```
//! use digipin_rs::{decode, encode};
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let pin = encode(28.6139, 77.2090)?;
//! assert_eq!(pin.to_string(), "39J-438-TJC7");
//!
//! // Separators are optional when decoding
//! let center = decode("39J438TJC7")?;
//! assert!((center.latitude - 28.6139).abs() < 0.01);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `DigipinCell` - A Code With Its Geometry
//!
//! ```
//! use digipin_rs::DigipinCell;
//! use geo_types::point;
//!
//! # fn main() -> Result<(), digipin_rs::DigipinError> {
//! let cell = DigipinCell::from_wgs84(&point! { x: 77.2090, y: 28.6139 })?;
//! let polygon = cell.to_polygon();
//! let feature = cell.to_geojson_feature();
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `csv_to_digipin_csv` - CSV File Conversion
//!
//! ```no_run
//! use digipin_rs::{CsvDigipinConfig, CsvToDigipin, GeometryFormat};
//!
//! let config = CsvDigipinConfig::from_coords("Latitude", "Longitude")
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```

pub mod cell;
pub mod coord;
pub mod error;
pub mod geom;
pub mod index;
pub mod io;
pub mod reference;

pub use cell::DigipinCell;
pub use coord::{Coordinate, LatLng, round_to_precision};
pub use error::DigipinError;
pub use geom::{GeometryFormat, parse_geometry, parse_geometry_in_domain};
pub use index::{
    BoundingBox, CODE_LENGTH, DISPLAY_LENGTH, Digipin, ROOT_BOUNDS, SYMBOL_GRID, decode,
    decode_bounds, decode_pin, encode,
};
pub use io::{
    CoordinateSource, CsvDigipinConfig, CsvSummary, CsvToDigipin, csv_to_digipin_csv,
    digipin_csv_to_coords_csv,
};

pub use geo_types;
