pub mod bounds;
mod codec;
pub mod constants;
mod pin;

pub use bounds::BoundingBox;
pub use codec::{decode, decode_bounds, decode_pin, encode};
pub use constants::{
    CODE_LENGTH, DISPLAY_LENGTH, GRID_SIZE, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON, ROOT_BOUNDS,
    SEPARATOR, SYMBOL_GRID, symbol_position,
};
pub use pin::Digipin;
