use crate::index::bounds::BoundingBox;

/// Number of rows and columns the grid is split into at every level
pub const GRID_SIZE: usize = 4;

/// Number of subdivision levels, one symbol per level
pub const CODE_LENGTH: usize = 10;

/// Display separator, decorative only
pub const SEPARATOR: char = '-';

/// Number of symbols after which a separator is rendered
pub const SEPARATOR_POSITIONS: [usize; 2] = [3, 6];

/// Length of the rendered code, `XXX-XXX-XXXX`
pub const DISPLAY_LENGTH: usize = CODE_LENGTH + SEPARATOR_POSITIONS.len();

/// Latitude/longitude extents of the root cell in degrees
pub const MIN_LAT: f64 = 2.5;
pub const MAX_LAT: f64 = 38.5;
pub const MIN_LON: f64 = 63.5;
pub const MAX_LON: f64 = 99.5;

/// The fixed domain every code is relative to
pub const ROOT_BOUNDS: BoundingBox = BoundingBox {
    min_lat: MIN_LAT,
    max_lat: MAX_LAT,
    min_lon: MIN_LON,
    max_lon: MAX_LON,
};

/// Scale factor for rounding decoded coordinates to six decimal places
pub(crate) const COORDINATE_PRECISION: f64 = 1_000_000.0;

/// Symbol layout. Columns run west to east, rows run north to south.
pub const SYMBOL_GRID: [[u8; GRID_SIZE]; GRID_SIZE] = [
    [b'F', b'C', b'9', b'8'],
    [b'J', b'3', b'2', b'7'],
    [b'K', b'4', b'5', b'6'],
    [b'L', b'M', b'P', b'T'],
];

/// Returns the `(row, col)` of `symbol` in [`SYMBOL_GRID`].
pub fn symbol_position(symbol: char) -> Option<(usize, usize)> {
    let byte = u8::try_from(symbol).ok()?;
    SYMBOL_GRID.iter().enumerate().find_map(|(row, symbols)| {
        symbols
            .iter()
            .position(|&s| s == byte)
            .map(|col| (row, col))
    })
}
