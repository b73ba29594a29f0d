use crate::coord::LatLng;
use crate::error::DigipinError;
use crate::index::bounds::BoundingBox;
use crate::index::constants::{CODE_LENGTH, ROOT_BOUNDS, SYMBOL_GRID};
use crate::index::pin::Digipin;

/// Encodes a latitude/longitude into the DIGIPIN of the level-10 cell holding it.
///
/// Both values must lie in the closed domain, lat `[2.5, 38.5]` and
/// lon `[63.5, 99.5]`.
///
/// # Example
/// ```
/// use digipin_rs::encode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let pin = encode(28.6139, 77.2090)?;
/// assert_eq!(pin.to_string(), "39J-438-TJC7");
/// # Ok(())
/// # }
/// ```
pub fn encode(lat: f64, lon: f64) -> Result<Digipin, DigipinError> {
    if !ROOT_BOUNDS.contains(lat, lon) {
        return Err(DigipinError::OutOfRange {
            latitude: lat,
            longitude: lon,
        });
    }

    let mut symbols = [0u8; CODE_LENGTH];
    let mut bounds = ROOT_BOUNDS;

    for symbol in symbols.iter_mut() {
        let (row, col, child) = bounds.encode_child(lat, lon);
        *symbol = SYMBOL_GRID[row][col];
        bounds = child;
    }

    Ok(Digipin::from_symbols(symbols))
}

/// Decodes a DIGIPIN, with or without separators, to the center of its cell.
///
/// # Example
/// ```
/// use digipin_rs::decode;
///
/// # fn main() -> Result<(), digipin_rs::DigipinError> {
/// let center = decode("39J-438-TJC7")?;
/// assert_eq!(center.latitude, 28.613901);
/// assert_eq!(center.longitude, 77.208998);
/// # Ok(())
/// # }
/// ```
pub fn decode(code: &str) -> Result<LatLng, DigipinError> {
    let pin = Digipin::parse(code)?;
    Ok(decode_pin(&pin))
}

/// Center of an already validated code, rounded to six decimal places.
pub fn decode_pin(pin: &Digipin) -> LatLng {
    let (lat, lon) = decode_bounds(pin).center();
    LatLng::new(lat, lon).rounded()
}

/// The level-10 cell a code denotes.
pub fn decode_bounds(pin: &Digipin) -> BoundingBox {
    pin.positions()
        .fold(ROOT_BOUNDS, |bounds, (row, col)| bounds.decode_child(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::constants::{DISPLAY_LENGTH, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

    const KNOWN_VECTORS: [(f64, f64, &str); 13] = [
        (28.6139, 77.2090, "39J-438-TJC7"),
        (12.0, 77.0, "4PL-FJL-FJLF"),
        (19.0760, 72.8777, "4FK-595-8823"),
        (13.0827, 80.2707, "4T3-84L-L5L9"),
        (22.5726, 88.3639, "2TF-J7F-86MM"),
        (17.3850, 78.4867, "422-594-J546"),
        (12.9716, 77.5946, "4P3-JK8-52C9"),
        (26.9124, 75.7873, "33C-635-JK43"),
        (2.5, 63.5, "LLL-LLL-LLLL"),
        (2.5, 99.5, "TTT-TTT-TTTT"),
        (38.5, 63.5, "FFF-FFF-FFFF"),
        (38.5, 99.5, "888-888-8888"),
        (20.5, 81.5, "2LL-LLL-LLLL"),
    ];

    fn lattice() -> impl Iterator<Item = (f64, f64)> {
        (0..=40).flat_map(|i| {
            (0..=40).map(move |j| {
                (
                    MIN_LAT + 36.0 * i as f64 / 40.0,
                    MIN_LON + 36.0 * j as f64 / 40.0,
                )
            })
        })
    }

    #[test]
    fn test_known_vectors() -> Result<(), DigipinError> {
        for (lat, lon, expected) in KNOWN_VECTORS {
            assert_eq!(encode(lat, lon)?.to_string(), expected, "({lat}, {lon})");
        }
        Ok(())
    }

    #[test]
    fn test_known_decodes() -> Result<(), DigipinError> {
        let delhi = decode("39J-438-TJC7")?;
        assert_eq!(delhi, LatLng::new(28.613901, 77.208998));

        let mumbai = decode("4FK5958823")?;
        assert_eq!(mumbai, LatLng::new(19.075983, 72.877707));

        let corner = decode("LLL-LLL-LLLL")?;
        assert_eq!(corner, LatLng::new(2.500017, 63.500017));
        Ok(())
    }

    #[test]
    fn test_new_delhi_decodes_nearby() -> Result<(), DigipinError> {
        let center = decode(&encode(28.6139, 77.2090)?.to_string())?;
        assert!((center.latitude - 28.6139).abs() < 0.01);
        assert!((center.longitude - 77.2090).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn test_encode_is_deterministic() -> Result<(), DigipinError> {
        assert_eq!(encode(17.385, 78.4867)?, encode(17.385, 78.4867)?);
        Ok(())
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            encode(2.4, 70.0),
            Err(DigipinError::OutOfRange {
                latitude: 2.4,
                longitude: 70.0
            })
        );
        assert!(matches!(
            encode(20.0, 100.0),
            Err(DigipinError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode(38.500001, 80.0),
            Err(DigipinError::OutOfRange { .. })
        ));
        assert!(matches!(
            encode(20.0, 63.499999),
            Err(DigipinError::OutOfRange { .. })
        ));
        assert!(encode(f64::NAN, 80.0).is_err());
        assert!(encode(20.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode("ABC"), Err(DigipinError::InvalidLength(3)));
        assert_eq!(decode("39J438TJCZ"), Err(DigipinError::InvalidSymbol('Z')));
    }

    #[test]
    fn test_corners_and_center() -> Result<(), DigipinError> {
        let points = [
            (MIN_LAT, MIN_LON),
            (MIN_LAT, MAX_LON),
            (MAX_LAT, MIN_LON),
            (MAX_LAT, MAX_LON),
            ((MIN_LAT + MAX_LAT) / 2.0, (MIN_LON + MAX_LON) / 2.0),
        ];

        for (lat, lon) in points {
            let pin = encode(lat, lon)?;
            let cell = decode_bounds(&pin);
            assert!(cell.contains(lat, lon), "({lat}, {lon}) not in {pin}");
        }
        Ok(())
    }

    #[test]
    fn test_round_trip_over_domain() -> Result<(), DigipinError> {
        for (lat, lon) in lattice() {
            let pin = encode(lat, lon)?;
            let rendered = pin.to_string();

            assert_eq!(rendered.len(), DISPLAY_LENGTH);
            assert!(
                pin.symbols()
                    .chars()
                    .all(|c| SYMBOL_GRID.iter().flatten().any(|&s| s as char == c))
            );

            assert!(decode_bounds(&pin).contains(lat, lon), "({lat}, {lon})");

            let center = decode(&rendered)?;
            assert_eq!(encode(center.latitude, center.longitude)?, pin);
        }
        Ok(())
    }

    #[test]
    fn test_level_ten_cell_size() -> Result<(), DigipinError> {
        let cell = decode_bounds(&encode(28.6139, 77.2090)?);
        let expected = 36.0 / 4f64.powi(10);
        assert!((cell.max_lat - cell.min_lat - expected).abs() < 1e-12);
        assert!((cell.max_lon - cell.min_lon - expected).abs() < 1e-12);
        Ok(())
    }
}
